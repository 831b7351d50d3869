//! Local anvil node forked from the configured network

use tokio::sync::mpsc;
use tracing::info;

use crate::{
    constants::{ANVIL_COMMAND, ANVIL_HOST},
    env::EnvConfig,
    errors::ScriptError,
    process::spawn_streaming,
};

/// How the local node is started
#[derive(Clone, PartialEq, Eq)]
pub struct AnvilConfig {
    /// Interface to bind
    pub host: String,
    /// Upstream RPC the node forks from
    pub fork_url: String,
    /// Mnemonic of the dev accounts
    pub mnemonic: String,
    /// Chain id the node reports
    pub chain_id: String,
    /// Let any sender through without a signature
    pub auto_impersonate: bool,
}

impl From<&EnvConfig> for AnvilConfig {
    fn from(env: &EnvConfig) -> Self {
        Self {
            host: ANVIL_HOST.to_string(),
            fork_url: env.rpc_url.clone(),
            mnemonic: env.mnemonic.clone(),
            chain_id: env.chain_id.clone(),
            auto_impersonate: true,
        }
    }
}

impl AnvilConfig {
    /// Arguments passed to anvil
    pub fn args(&self) -> Vec<String> {
        let mut args = vec![
            "--host".to_string(),
            self.host.clone(),
            "-f".to_string(),
            self.fork_url.clone(),
            "-m".to_string(),
            self.mnemonic.clone(),
            "--chain-id".to_string(),
            self.chain_id.clone(),
        ];
        if self.auto_impersonate {
            args.push("--auto-impersonate".to_string());
        }
        args
    }
}

/// Forward every line from `lines` to `sink` until the channel closes,
/// returning how many lines went through
pub async fn relay_output<F>(mut lines: mpsc::UnboundedReceiver<String>, mut sink: F) -> usize
where
    F: FnMut(&str),
{
    let mut relayed = 0;
    while let Some(line) = lines.recv().await {
        sink(&line);
        relayed += 1;
    }
    relayed
}

/// Start anvil and relay its output to the console.
///
/// Only returns once anvil exits, which it does not do on its own.
pub async fn launch(config: &AnvilConfig) -> Result<(), ScriptError> {
    info!("using {} and seed from ENV for anvil...", config.fork_url);

    let (mut child, lines) = spawn_streaming(ANVIL_COMMAND, &config.args())?;
    relay_output(lines, |line| println!("{line}")).await;

    let status = child
        .wait()
        .await
        .map_err(|e| ScriptError::Process(e.to_string()))?;
    if !status.success() {
        return Err(ScriptError::Process(format!(
            "{ANVIL_COMMAND} exited with {status}"
        )));
    }

    Ok(())
}
