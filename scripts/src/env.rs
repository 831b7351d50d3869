//! Loading of the deployment environment from the dotenv file

use std::{
    collections::HashMap,
    env,
    path::{Path, PathBuf},
};

use alloy::{
    primitives::{Address, B256},
    signers::local::{coins_bip39::English, MnemonicBuilder},
};
use tracing::warn;

use crate::{
    constants::{
        CHAIN_ID_KEY, DEFAULT_CHAIN_ID, DEFAULT_MNEMONIC, DEFAULT_MNEMONIC_INDEX, DEFAULT_RPC,
        ENV_FILE_NAME, ETHERSCAN_API_KEY_KEY, MNEMONIC_INDEX_KEY, MNEMONIC_KEY, RPC_URL_KEY,
    },
    errors::ScriptError,
};

/// The resolved deployment environment.
///
/// Built once per process and passed by reference to whatever needs it.
#[derive(Clone, PartialEq, Eq)]
pub struct EnvConfig {
    /// RPC endpoint, used for scripts and as anvil's fork source
    pub rpc_url: String,
    /// Private key derived from the mnemonic
    pub private_key: Option<B256>,
    /// Address derived from the mnemonic
    pub admin_address: Option<Address>,
    /// Etherscan-compatible API key, only needed to verify broadcasted deployments
    pub etherscan_api_key: Option<String>,
    /// Mnemonic phrase
    pub mnemonic: String,
    /// Derivation index used with the mnemonic
    pub mnemonic_index: u32,
    /// Chain id
    pub chain_id: String,
}

// Keep secrets out of logs
impl std::fmt::Debug for EnvConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvConfig")
            .field("rpc_url", &self.rpc_url)
            .field("admin_address", &self.admin_address)
            .field("has_etherscan_api_key", &self.etherscan_api_key.is_some())
            .field("mnemonic_index", &self.mnemonic_index)
            .field("chain_id", &self.chain_id)
            .finish_non_exhaustive()
    }
}

impl EnvConfig {
    /// Build the config from a key lookup, falling back to the defaults
    /// (with a warning) for every unset or empty key
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let rpc_url = warn_if_not_set(&lookup, RPC_URL_KEY).unwrap_or_else(|| DEFAULT_RPC.into());
        let mnemonic =
            warn_if_not_set(&lookup, MNEMONIC_KEY).unwrap_or_else(|| DEFAULT_MNEMONIC.into());
        let mnemonic_index = warn_if_not_set(&lookup, MNEMONIC_INDEX_KEY)
            .and_then(|index| match index.trim().parse::<u32>() {
                Ok(index) => Some(index),
                Err(e) => {
                    warn!("{MNEMONIC_INDEX_KEY} is not a valid index ({e}), using {DEFAULT_MNEMONIC_INDEX}");
                    None
                }
            })
            .unwrap_or(DEFAULT_MNEMONIC_INDEX);
        let chain_id =
            warn_if_not_set(&lookup, CHAIN_ID_KEY).unwrap_or_else(|| DEFAULT_CHAIN_ID.into());

        // No fallback, only required when verifying a broadcast
        let etherscan_api_key = warn_if_not_set(&lookup, ETHERSCAN_API_KEY_KEY);

        let (private_key, admin_address) = match derive_deployer(&mnemonic, mnemonic_index) {
            Ok((key, address)) => (Some(key), Some(address)),
            Err(e) => {
                warn!("{e}, no deployer key available");
                (None, None)
            }
        };

        Self {
            rpc_url,
            private_key,
            admin_address,
            etherscan_api_key,
            mnemonic,
            mnemonic_index,
            chain_id,
        }
    }
}

/// Load the environment from the dotenv file at `path`.
///
/// Variables exported in the process environment take precedence over the
/// file, and the process environment itself is left untouched.
pub fn load_env(path: &Path) -> EnvConfig {
    let file_vars = match read_env_file(path) {
        Ok(vars) => vars,
        Err(e) => {
            warn!("{e}, relying on the process environment only");
            HashMap::new()
        }
    };

    EnvConfig::from_lookup(|key| env::var(key).ok().or_else(|| file_vars.get(key).cloned()))
}

/// The dotenv file at the workspace root
pub fn default_env_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join(ENV_FILE_NAME)
}

/// Parse the dotenv file into a map, without exporting anything
fn read_env_file(path: &Path) -> Result<HashMap<String, String>, ScriptError> {
    let iter = dotenv::from_path_iter(path)
        .map_err(|e| ScriptError::EnvFile(format!("{}: {}", path.display(), e)))?;

    iter.map(|item| item.map_err(|e| ScriptError::EnvFile(e.to_string())))
        .collect()
}

/// Returns the value of `key`, or warns and returns `None` when unset or empty
fn warn_if_not_set<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) if !value.is_empty() => Some(value),
        _ => {
            warn!("{key} not set");
            None
        }
    }
}

/// Derive the deployer private key and address at `m/44'/60'/0'/0/{index}`
pub fn derive_deployer(mnemonic: &str, index: u32) -> Result<(B256, Address), ScriptError> {
    let signer = MnemonicBuilder::<English>::default()
        .phrase(mnemonic)
        .index(index)
        .map_err(|e| ScriptError::KeyDerivation(e.to_string()))?
        .build()
        .map_err(|e| ScriptError::KeyDerivation(e.to_string()))?;

    let private_key = B256::from_slice(&signer.credential().to_bytes());

    Ok((private_key, signer.address()))
}
