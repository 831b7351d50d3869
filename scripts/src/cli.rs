//! Definitions of CLI arguments for the deploy scripts

use std::{
    fmt::{self, Display},
    path::PathBuf,
};

use clap::{Parser, ValueEnum};

/// Run a forge deployment script against the configured network
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "deploy")]
pub struct DeployCli {
    /// Name of the forge script contract to run
    pub task: Option<String>,

    /// Network RPC URL, overrides `RPC_URL`
    #[arg(short = 'r', long = "rpcUrl")]
    pub rpc_url: Option<String>,

    /// Etherscan API key used to verify, overrides `ETHERSCAN_API_KEY`
    #[arg(short = 'k', long = "etherscanApiKey")]
    pub etherscan_api_key: Option<String>,

    /// Broadcast the transactions instead of only simulating them
    #[arg(short, long)]
    pub broadcast: bool,

    /// Verbosity passed to forge, 3 gives `-vvv`
    #[arg(short, long, default_value_t = 0)]
    pub verbosity: u8,
}

/// Extract sanctioned digital currency addresses from the OFAC special
/// designated nationals list (sdn_advanced.xml)
#[derive(Parser, Debug, Clone)]
#[command(name = "sanctioned-addresses")]
pub struct SanctionsCli {
    /// The assets for which the sanctioned addresses should be extracted
    #[arg(value_enum, default_value = "ETH")]
    pub assets: Vec<Asset>,

    /// Output file formats of the address lists
    #[arg(short = 'f', long, value_enum, num_args = 1.., default_value = "JSON")]
    pub output_format: Vec<OutputFormat>,

    /// Directory where the lists are written
    #[arg(short = 'p', long, default_value = "./")]
    pub output_path: PathBuf,

    /// JSON file of known addresses, new ones are printed
    #[arg(short, long)]
    pub compare_file: Option<PathBuf>,

    /// Use a local sdn_advanced.xml instead of downloading it
    #[arg(long)]
    pub sdn_file: Option<PathBuf>,
}

/// Digital currencies listed in the SDN file
#[derive(ValueEnum, Debug, Copy, Clone, PartialEq, Eq)]
#[value(rename_all = "UPPER")]
pub enum Asset {
    /// Bitcoin
    Xbt,
    /// Ether
    Eth,
    /// Monero
    Xmr,
    /// Litecoin
    Ltc,
    /// Zcash
    Zec,
    /// Dash
    Dash,
    /// Bitcoin Gold
    Btg,
    /// Ethereum Classic
    Etc,
    /// Bitcoin SV
    Bsv,
    /// Bitcoin Cash
    Bch,
    /// Verge
    Xvg,
    /// Tether
    Usdt,
    /// Ripple
    Xrp,
    /// Arbitrum
    Arb,
    /// BNB Smart Chain
    Bsc,
    /// USD Coin
    Usdc,
    /// Tron
    Trx,
}

impl Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ticker = match self {
            Asset::Xbt => "XBT",
            Asset::Eth => "ETH",
            Asset::Xmr => "XMR",
            Asset::Ltc => "LTC",
            Asset::Zec => "ZEC",
            Asset::Dash => "DASH",
            Asset::Btg => "BTG",
            Asset::Etc => "ETC",
            Asset::Bsv => "BSV",
            Asset::Bch => "BCH",
            Asset::Xvg => "XVG",
            Asset::Usdt => "USDT",
            Asset::Xrp => "XRP",
            Asset::Arb => "ARB",
            Asset::Bsc => "BSC",
            Asset::Usdc => "USDC",
            Asset::Trx => "TRX",
        };
        write!(f, "{}", ticker)
    }
}

/// Output formats of an address list
#[derive(ValueEnum, Debug, Copy, Clone, PartialEq, Eq)]
#[value(rename_all = "UPPER")]
pub enum OutputFormat {
    /// One address per line
    Txt,
    /// A JSON array of addresses
    Json,
}

impl OutputFormat {
    /// File extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Txt => "txt",
            OutputFormat::Json => "json",
        }
    }
}
