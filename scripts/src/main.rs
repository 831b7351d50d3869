use std::{env, process::ExitCode};

use eth0_scripts::{commands::deploy_main, env::default_env_path, process::ShellRunner};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt().with_target(false).init();

    ExitCode::from(deploy_main(env::args_os(), &default_env_path(), &ShellRunner).await)
}
