//! The deploy runner: argument parsing, script execution and exit status

use std::{ffi::OsString, path::Path};

use clap::{error::ErrorKind, Parser};
use tracing::{error, info};

use crate::{
    cli::DeployCli,
    env::load_env,
    errors::ScriptError,
    process::ProcessRunner,
    script::{script_handler, ScriptResult},
};

/// Exit status of a failed script or a missing script name
pub const EXIT_FAILURE: u8 = 1;
/// Exit status of a malformed command line
pub const EXIT_USAGE: u8 = 2;

/// Parse the deploy runner's command line.
///
/// On `Err`, the process should exit with the carried status: 0 after
/// printing help or version, [`EXIT_USAGE`] after a parse failure.
pub fn parse_deploy_cli<I, T>(args: I) -> Result<DeployCli, u8>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    DeployCli::try_parse_from(args).map_err(|e| match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            // Nothing useful to do if stdout is gone
            let _ = e.print();
            0
        }
        _ => {
            error!(
                "{}",
                ScriptError::ArgumentParse(e.to_string().trim_end().to_string())
            );
            EXIT_USAGE
        }
    })
}

/// The whole deploy runner, returning the process exit status
pub async fn deploy_main<I, T, R>(args: I, env_path: &Path, runner: &R) -> u8
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    R: ProcessRunner,
{
    let cli = match parse_deploy_cli(args) {
        Ok(cli) => cli,
        Err(status) => return status,
    };

    match run_deploy(&cli, env_path, runner).await {
        Ok(result) => report_script_result(&result),
        Err(e) => {
            error!("{e}");
            EXIT_FAILURE
        }
    }
}

/// Run the forge script named by the CLI task, using the environment
/// loaded from `env_path`
pub async fn run_deploy<R: ProcessRunner>(
    cli: &DeployCli,
    env_path: &Path,
    runner: &R,
) -> Result<ScriptResult, ScriptError> {
    // Checked before anything is loaded or spawned
    let name = cli
        .task
        .as_deref()
        .filter(|name| !name.is_empty())
        .ok_or(ScriptError::MissingScriptName)?;

    let env = load_env(env_path);

    Ok(script_handler(cli, name, &env, runner).await)
}

/// Print the script output, returning the process exit status
pub fn report_script_result(result: &ScriptResult) -> u8 {
    println!("{}", result.stdout);

    match &result.stderr {
        Some(stderr) => {
            eprintln!("{stderr}");
            error!("Script failed");
            EXIT_FAILURE
        }
        None => {
            info!("Script successful ✅.");
            0
        }
    }
}
