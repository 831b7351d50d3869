//! Running forge deployment scripts

use tracing::info;

use crate::{
    cli::DeployCli,
    constants::{FORGE_COMMAND, SCRIPT_SENDER, SCRIPT_SUBCOMMAND},
    env::EnvConfig,
    process::ProcessRunner,
};

/// Fully resolved arguments of a `forge script` invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForgeScriptArgs {
    /// RPC endpoint, omitted from the command when `None`
    pub rpc_url: Option<String>,
    /// The solidity script contract to run
    pub script_contract_name: String,
    /// Verification key, only used when broadcasting
    pub etherscan_api_key: Option<String>,
    /// Whether to broadcast the transactions
    pub broadcast: bool,
    /// Number of `v` in forge's verbosity flag
    pub verbosity: u8,
}

/// Output of a forge script run.
///
/// `stderr` is only set when the run failed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptResult {
    /// What forge printed on stdout
    pub stdout: String,
    /// What forge printed on stderr, or why it could not run
    pub stderr: Option<String>,
}

impl ScriptResult {
    /// Whether the script ran successfully
    pub fn is_success(&self) -> bool {
        self.stderr.is_none()
    }
}

/// Assemble the forge command line
pub fn build_forge_command(args: &ForgeScriptArgs) -> String {
    let mut cmd = format!(
        "{FORGE_COMMAND} {SCRIPT_SUBCOMMAND} {}",
        args.script_contract_name
    );
    cmd.push_str(&format!(" --unlocked --sender {SCRIPT_SENDER}"));
    cmd.push_str(" --force --slow");

    if args.broadcast {
        cmd.push_str(" --broadcast");

        // Nothing to verify without a broadcast
        if let Some(key) = &args.etherscan_api_key {
            cmd.push_str(&format!(" --etherscan-api-key {key} --verify"));
        }
    }

    if let Some(rpc_url) = &args.rpc_url {
        cmd.push_str(&format!(" --rpc-url {rpc_url}"));
    }

    if args.verbosity > 0 {
        cmd.push_str(&format!(" -{}", "v".repeat(args.verbosity as usize)));
    }

    cmd
}

/// Run forge with `args`, folding any failure into the returned result
pub async fn run_forge_script<R: ProcessRunner>(
    runner: &R,
    args: &ForgeScriptArgs,
) -> ScriptResult {
    if args.broadcast {
        info!("will broadcast transactions");
    }

    let command = build_forge_command(args);
    info!("executeCmd: {command}");

    match runner.run(&command).await {
        Ok(output) if output.success() => ScriptResult {
            stdout: output.stdout,
            stderr: None,
        },
        Ok(output) => {
            let stderr = if output.stderr.trim().is_empty() {
                match output.exit_code {
                    Some(code) => format!("{FORGE_COMMAND} exited with status {code}"),
                    None => format!("{FORGE_COMMAND} was terminated by a signal"),
                }
            } else {
                output.stderr
            };
            ScriptResult {
                stdout: output.stdout,
                stderr: Some(stderr),
            }
        }
        Err(e) => ScriptResult {
            stdout: String::new(),
            stderr: Some(e.to_string()),
        },
    }
}

/// Resolve the script arguments, CLI values first then the environment,
/// and run the script
pub async fn script_handler<R: ProcessRunner>(
    cli: &DeployCli,
    script_contract_name: &str,
    env: &EnvConfig,
    runner: &R,
) -> ScriptResult {
    let args = resolve_script_args(cli, script_contract_name, env);
    run_forge_script(runner, &args).await
}

/// Layer the CLI over the environment
pub fn resolve_script_args(
    cli: &DeployCli,
    script_contract_name: &str,
    env: &EnvConfig,
) -> ForgeScriptArgs {
    let broadcast = cli.broadcast;

    let rpc_url = match cli.rpc_url.as_deref().filter(|url| !url.is_empty()) {
        Some(url) => url.to_string(),
        None => {
            info!("no RPC provided will use RPC_URL env");
            env.rpc_url.clone()
        }
    };

    let mut etherscan_api_key = cli
        .etherscan_api_key
        .clone()
        .filter(|key| !key.is_empty());
    if etherscan_api_key.is_none() && broadcast {
        info!("will use etherscan Api Key from ENV");
        etherscan_api_key = env.etherscan_api_key.clone();
    }

    ForgeScriptArgs {
        rpc_url: Some(rpc_url).filter(|url| !url.is_empty()),
        script_contract_name: script_contract_name.to_string(),
        etherscan_api_key,
        broadcast,
        verbosity: cli.verbosity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::{mock::MockRunner, ProcessOutput};

    fn test_env(rpc_url: &str, etherscan_api_key: Option<&str>) -> EnvConfig {
        let mut env = EnvConfig::from_lookup(|_| None);
        env.rpc_url = rpc_url.to_string();
        env.etherscan_api_key = etherscan_api_key.map(str::to_string);
        env
    }

    fn ok_output(stdout: &str) -> ProcessOutput {
        ProcessOutput {
            stdout: stdout.to_string(),
            stderr: String::new(),
            exit_code: Some(0),
        }
    }

    #[test]
    fn minimal_command() {
        let args = ForgeScriptArgs {
            script_contract_name: "Deploy".to_string(),
            ..Default::default()
        };

        assert_eq!(
            build_forge_command(&args),
            "forge script Deploy --unlocked --sender 0x411fab2b2a2811fa7dee401f8822de1782561804 --force --slow"
        );
    }

    #[test]
    fn verbosity_flag() {
        let mut args = ForgeScriptArgs {
            script_contract_name: "Deploy".to_string(),
            ..Default::default()
        };
        assert!(!build_forge_command(&args).contains(" -v"));

        args.verbosity = 3;
        let cmd = build_forge_command(&args);
        assert_eq!(cmd.matches("-vvv").count(), 1);
        assert!(cmd.ends_with(" -vvv"));
        assert!(!cmd.contains("-vvvv"));
    }

    #[test]
    fn verification_needs_broadcast() {
        let mut args = ForgeScriptArgs {
            script_contract_name: "Deploy".to_string(),
            etherscan_api_key: Some("ABC123".to_string()),
            broadcast: true,
            ..Default::default()
        };

        let cmd = build_forge_command(&args);
        let broadcast = cmd.find("--broadcast").unwrap();
        let verify = cmd.find("--etherscan-api-key ABC123 --verify").unwrap();
        assert!(broadcast < verify);

        args.broadcast = false;
        let cmd = build_forge_command(&args);
        assert!(!cmd.contains("--broadcast"));
        assert!(!cmd.contains("--etherscan-api-key"));
        assert!(!cmd.contains("--verify"));
    }

    #[test]
    fn broadcast_without_key_skips_verification() {
        let args = ForgeScriptArgs {
            script_contract_name: "Deploy".to_string(),
            broadcast: true,
            ..Default::default()
        };

        let cmd = build_forge_command(&args);
        assert!(cmd.contains("--broadcast"));
        assert!(!cmd.contains("--verify"));
    }

    #[test]
    fn cli_rpc_url_wins() {
        let cli = DeployCli {
            rpc_url: Some("http://cli:8545".to_string()),
            ..Default::default()
        };
        let args = resolve_script_args(&cli, "Deploy", &test_env("http://env:8545", None));

        assert_eq!(args.rpc_url.as_deref(), Some("http://cli:8545"));
        assert!(build_forge_command(&args).contains("--rpc-url http://cli:8545"));
        assert!(!build_forge_command(&args).contains("http://env:8545"));
    }

    #[test]
    fn env_rpc_url_is_the_fallback() {
        let args = resolve_script_args(
            &DeployCli::default(),
            "Deploy",
            &test_env("http://env:8545", None),
        );
        assert_eq!(args.rpc_url.as_deref(), Some("http://env:8545"));
    }

    #[test]
    fn env_api_key_only_when_broadcasting() {
        let env = test_env("http://env:8545", Some("ENVKEY"));

        let args = resolve_script_args(&DeployCli::default(), "Deploy", &env);
        assert_eq!(args.etherscan_api_key, None);

        let cli = DeployCli {
            broadcast: true,
            ..Default::default()
        };
        let args = resolve_script_args(&cli, "Deploy", &env);
        assert_eq!(args.etherscan_api_key.as_deref(), Some("ENVKEY"));

        let cli = DeployCli {
            broadcast: true,
            etherscan_api_key: Some("CLIKEY".to_string()),
            ..Default::default()
        };
        let args = resolve_script_args(&cli, "Deploy", &env);
        assert_eq!(args.etherscan_api_key.as_deref(), Some("CLIKEY"));
    }

    #[tokio::test]
    async fn full_deploy_command() {
        let cli = DeployCli {
            task: Some("deployContract".to_string()),
            broadcast: true,
            etherscan_api_key: Some("XYZ".to_string()),
            verbosity: 2,
            ..Default::default()
        };
        let runner = MockRunner::new(ok_output("ok"));

        let result = script_handler(
            &cli,
            "deployContract",
            &test_env("http://localhost:8545", None),
            &runner,
        )
        .await;

        assert!(result.is_success());
        assert_eq!(
            runner.commands(),
            vec!["forge script deployContract --unlocked --sender 0x411fab2b2a2811fa7dee401f8822de1782561804 --force --slow --broadcast --etherscan-api-key XYZ --verify --rpc-url http://localhost:8545 -vv"]
        );
    }

    #[tokio::test]
    async fn success_keeps_stdout_only() {
        let runner = MockRunner::new(ProcessOutput {
            stdout: "Script ran successfully.".to_string(),
            stderr: "warning: unused variable".to_string(),
            exit_code: Some(0),
        });
        let args = ForgeScriptArgs {
            script_contract_name: "Deploy".to_string(),
            ..Default::default()
        };

        let result = run_forge_script(&runner, &args).await;
        assert_eq!(result.stdout, "Script ran successfully.");
        assert_eq!(result.stderr, None);
    }

    #[tokio::test]
    async fn failure_is_captured() {
        let runner = MockRunner::new(ProcessOutput {
            stdout: "Compiling...".to_string(),
            stderr: "revert".to_string(),
            exit_code: Some(1),
        });
        let args = ForgeScriptArgs {
            script_contract_name: "Deploy".to_string(),
            ..Default::default()
        };

        let result = run_forge_script(&runner, &args).await;
        assert!(!result.is_success());
        assert_eq!(result.stdout, "Compiling...");
        assert_eq!(result.stderr.as_deref(), Some("revert"));
    }

    #[tokio::test]
    async fn silent_failure_still_reports() {
        let runner = MockRunner::new(ProcessOutput {
            stdout: String::new(),
            stderr: String::new(),
            exit_code: Some(101),
        });
        let args = ForgeScriptArgs {
            script_contract_name: "Deploy".to_string(),
            ..Default::default()
        };

        let result = run_forge_script(&runner, &args).await;
        assert_eq!(result.stderr.as_deref(), Some("forge exited with status 101"));
    }

    #[tokio::test]
    async fn spawn_failure_is_captured() {
        let runner = MockRunner::unspawnable();
        let args = ForgeScriptArgs {
            script_contract_name: "Deploy".to_string(),
            ..Default::default()
        };

        let result = run_forge_script(&runner, &args).await;
        assert_eq!(result.stdout, "");
        assert!(result.stderr.unwrap().contains("sh: not found"));
    }
}
