use log::debug;
use std::fmt;
use std::process::{Command, ExitStatus, Stdio};

/// Name of the Cloud Foundry CLI binary, resolved via the search path.
pub(crate) const CF: &str = "cf";

/// Captured output streams of a finished `cf` invocation.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LogOutput {
    pub stdout: String,
    pub stderr: String,
}

impl fmt::Display for LogOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "stdout:\n{}\nstderr:\n{}", self.stdout, self.stderr)
    }
}

/// How the child process' output streams are handled.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum OutputPolicy {
    /// Pipe and buffer both streams, handing them back to the caller.
    Capture,
    /// Let the child write to this process' stdio so its output can be
    /// observed live. The returned [`LogOutput`] is empty.
    Inherit,
}

/// Error that occurred while running a `cf` command.
#[derive(thiserror::Error, Debug)]
pub enum CommandError {
    #[error("Couldn't spawn `{command_line}`: {io_error}")]
    Io {
        command_line: String,
        #[source]
        io_error: std::io::Error,
    },
    #[error("Command `{command_line}` exited with {exit_status}\n{log_output}")]
    NonZeroExitCode {
        command_line: String,
        exit_status: ExitStatus,
        log_output: LogOutput,
    },
}

/// Runs the given command to completion, blocking the current thread.
///
/// Exactly one child process is spawned per call. A non-zero exit status is
/// turned into [`CommandError::NonZeroExitCode`] carrying the rendered
/// command line and, for [`OutputPolicy::Capture`], the buffered output.
pub(crate) fn run_command(
    mut command: Command,
    output_policy: OutputPolicy,
) -> Result<LogOutput, CommandError> {
    let command_line = render_command_line(&command);
    debug!("running `{command_line}`");

    match output_policy {
        OutputPolicy::Capture => {
            let output = command
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .output()
                .map_err(|io_error| CommandError::Io {
                    command_line: command_line.clone(),
                    io_error,
                })?;

            let log_output = LogOutput {
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            };

            if output.status.success() {
                Ok(log_output)
            } else {
                Err(CommandError::NonZeroExitCode {
                    command_line,
                    exit_status: output.status,
                    log_output,
                })
            }
        }
        OutputPolicy::Inherit => {
            let exit_status = command
                .spawn()
                .and_then(|mut child| child.wait())
                .map_err(|io_error| CommandError::Io {
                    command_line: command_line.clone(),
                    io_error,
                })?;

            if exit_status.success() {
                Ok(LogOutput::default())
            } else {
                Err(CommandError::NonZeroExitCode {
                    command_line,
                    exit_status,
                    log_output: LogOutput::default(),
                })
            }
        }
    }
}

fn render_command_line(command: &Command) -> String {
    std::iter::once(command.get_program())
        .chain(command.get_args())
        .map(|part| part.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(unix)]
    fn capture_returns_both_streams_on_success() {
        let mut command = Command::new("sh");
        command.args(["-c", "echo out; echo err >&2"]);

        let log_output = run_command(command, OutputPolicy::Capture).unwrap();

        assert_eq!(log_output.stdout, "out\n");
        assert_eq!(log_output.stderr, "err\n");
    }

    #[test]
    #[cfg(unix)]
    fn capture_carries_output_in_the_error_on_non_zero_exit() {
        let mut command = Command::new("sh");
        command.args(["-c", "echo boom; exit 3"]);

        match run_command(command, OutputPolicy::Capture).unwrap_err() {
            CommandError::NonZeroExitCode {
                command_line,
                exit_status,
                log_output,
            } => {
                assert_eq!(command_line, "sh -c echo boom; exit 3");
                assert_eq!(exit_status.code(), Some(3));
                assert_eq!(log_output.stdout, "boom\n");
            }
            other => panic!("Unexpected error: {other:?}"),
        }
    }

    #[test]
    #[cfg(unix)]
    fn inherit_returns_empty_output_on_success() {
        let log_output = run_command(Command::new("true"), OutputPolicy::Inherit).unwrap();
        assert_eq!(log_output, LogOutput::default());
    }

    #[test]
    #[cfg(unix)]
    fn inherit_carries_no_output_in_the_error_on_non_zero_exit() {
        match run_command(Command::new("false"), OutputPolicy::Inherit).unwrap_err() {
            CommandError::NonZeroExitCode {
                command_line,
                log_output,
                ..
            } => {
                assert_eq!(command_line, "false");
                assert_eq!(log_output, LogOutput::default());
            }
            other => panic!("Unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_binary_is_an_io_error() {
        let command = Command::new("cf-adapter-binary-that-does-not-exist");

        assert!(matches!(
            run_command(command, OutputPolicy::Capture),
            Err(CommandError::Io { .. })
        ));
    }

    #[test]
    #[cfg(unix)]
    fn capture_honours_the_working_directory_of_the_command() {
        let work_dir = tempfile::tempdir().unwrap();
        std::fs::write(work_dir.path().join("marker"), "hello").unwrap();

        let mut command = Command::new("cat");
        command.arg("marker");
        command.current_dir(work_dir.path());

        let log_output = run_command(command, OutputPolicy::Capture).unwrap();
        assert_eq!(log_output.stdout, "hello");
    }
}
