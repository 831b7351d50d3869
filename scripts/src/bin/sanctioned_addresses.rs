use clap::Parser;
use eth0_scripts::{cli::SanctionsCli, errors::ScriptError, sanctions};

#[tokio::main]
async fn main() -> Result<(), ScriptError> {
    let cli = SanctionsCli::parse();

    tracing_subscriber::fmt().pretty().init();

    sanctions::run(&cli).await
}
