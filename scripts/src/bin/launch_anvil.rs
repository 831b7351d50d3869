use std::process::ExitCode;

use eth0_scripts::{
    anvil::{launch, AnvilConfig},
    env::{default_env_path, load_env},
};
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt().with_target(false).init();

    let env = load_env(&default_env_path());

    match launch(&AnvilConfig::from(&env)).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
