//! Constants used in the deploy scripts

/// Name of the dotenv file, looked up at the workspace root
pub const ENV_FILE_NAME: &str = ".env";

/// Env key of the RPC endpoint
pub const RPC_URL_KEY: &str = "RPC_URL";
/// Env key of the deployer mnemonic phrase
pub const MNEMONIC_KEY: &str = "MNEMONIC";
/// Env key of the derivation index used with the mnemonic
pub const MNEMONIC_INDEX_KEY: &str = "MNEMONIC_INDEX";
/// Env key of the chain id
pub const CHAIN_ID_KEY: &str = "CHAIN_ID";
/// Env key of the Etherscan-compatible API key
pub const ETHERSCAN_API_KEY_KEY: &str = "ETHERSCAN_API_KEY";

/// Default RPC endpoint
pub const DEFAULT_RPC: &str = "https://rpc.flashbots.net";

/// Well-known public test mnemonic, never use it with real funds
pub const DEFAULT_MNEMONIC: &str = "test test test test test test test test test test test junk";

/// Default derivation index
pub const DEFAULT_MNEMONIC_INDEX: u32 = 0;

/// Default chain id (Ethereum mainnet)
pub const DEFAULT_CHAIN_ID: &str = "1";

/// The contract scripting tool
pub const FORGE_COMMAND: &str = "forge";

/// The forge subcommand running solidity scripts
pub const SCRIPT_SUBCOMMAND: &str = "script";

/// Sender used for every forge script, the scripts run `--unlocked`
pub const SCRIPT_SENDER: &str = "0x411fab2b2a2811fa7dee401f8822de1782561804";

/// The local test-chain binary
pub const ANVIL_COMMAND: &str = "anvil";

/// Interface anvil binds to
pub const ANVIL_HOST: &str = "0.0.0.0";

/// Shell used to run assembled command lines
pub const SHELL: &str = "sh";

/// OFAC special designated nationals list, advanced XML format
pub const SDN_URL: &str = "https://www.treasury.gov/ofac/downloads/sanctions/1.0/sdn_advanced.xml";

/// Prefix of the SDN feature types describing digital currency addresses
pub const FEATURE_TYPE_PREFIX: &str = "Digital Currency Address - ";

/// File stem of the extracted address lists
pub const SANCTIONED_ADDRESSES_FILE_STEM: &str = "sanctioned_addresses";
