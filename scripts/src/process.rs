//! Running external tools.
//!
//! Short-lived tools go through [`ProcessRunner`] so callers can be tested
//! against a fake runner. Long-lived children hand their output back as a
//! channel of lines.

use std::{future::Future, process::Stdio};

use tokio::{
    io::{AsyncBufReadExt, AsyncRead, BufReader},
    process::{Child, Command},
    sync::mpsc,
};
use tracing::warn;

use crate::{constants::SHELL, errors::ScriptError};

/// Everything a finished process left behind
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Captured standard output
    pub stdout: String,
    /// Captured standard error
    pub stderr: String,
    /// Exit code, `None` when killed by a signal
    pub exit_code: Option<i32>,
}

impl ProcessOutput {
    /// Whether the process exited with status 0
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Runs a full command line to completion
pub trait ProcessRunner {
    /// Run `command` and collect its output. An `Err` means the process
    /// could not be run at all, a failing exit is reported in the output.
    fn run(
        &self,
        command: &str,
    ) -> impl Future<Output = Result<ProcessOutput, ScriptError>> + Send;
}

/// Runs commands through `sh -c`
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellRunner;

impl ProcessRunner for ShellRunner {
    async fn run(&self, command: &str) -> Result<ProcessOutput, ScriptError> {
        let output = Command::new(SHELL)
            .arg("-c")
            .arg(command)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| ScriptError::Process(e.to_string()))?;

        Ok(ProcessOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code: output.status.code(),
        })
    }
}

/// Forward every line read from `reader` into a channel.
///
/// Lines are decoded lossily so a stray invalid byte never stops the relay.
/// The channel closes once the reader hits EOF or fails.
pub fn stream_lines<R>(reader: R) -> mpsc::UnboundedReceiver<String>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        let mut reader = BufReader::new(reader);
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf).await {
                Ok(0) => break,
                Ok(_) => {
                    let line = String::from_utf8_lossy(trim_line_ending(&buf)).into_owned();
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!("stopped reading process output: {e}");
                    break;
                }
            }
        }
    });

    rx
}

/// Strip a trailing `\n` or `\r\n`
fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Spawn `program` with piped stdout, returning the child and its output lines
pub fn spawn_streaming(
    program: &str,
    args: &[String],
) -> Result<(Child, mpsc::UnboundedReceiver<String>), ScriptError> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .spawn()
        .map_err(|e| ScriptError::Process(format!("{program}: {e}")))?;

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| ScriptError::Process(format!("{program}: stdout not captured")))?;

    Ok((child, stream_lines(stdout)))
}

/// A fake runner for tests
#[cfg(test)]
pub(crate) mod mock {
    use std::sync::Mutex;

    use super::*;

    /// Records the commands it is asked to run and answers with a canned output
    #[derive(Default)]
    pub struct MockRunner {
        /// Every command line passed to `run`, in order
        pub commands: Mutex<Vec<String>>,
        /// Output of every run, `None` makes every run fail to spawn
        pub response: Option<ProcessOutput>,
    }

    impl MockRunner {
        /// A runner answering every command with `response`
        pub fn new(response: ProcessOutput) -> Self {
            Self {
                commands: Mutex::new(Vec::new()),
                response: Some(response),
            }
        }

        /// A runner whose processes can never start
        pub fn unspawnable() -> Self {
            Self::default()
        }

        /// The commands run so far
        pub fn commands(&self) -> Vec<String> {
            self.commands.lock().unwrap().clone()
        }
    }

    impl ProcessRunner for MockRunner {
        async fn run(&self, command: &str) -> Result<ProcessOutput, ScriptError> {
            self.commands.lock().unwrap().push(command.to_string());
            self.response
                .clone()
                .ok_or_else(|| ScriptError::Process("sh: not found".to_string()))
        }
    }
}
