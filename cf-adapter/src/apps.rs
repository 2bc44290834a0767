use crate::exec::{CF, CommandError, OutputPolicy, run_command};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Represents a `cf push` command.
#[derive(Clone, Debug)]
pub(crate) struct PushCommand {
    app_dir: PathBuf,
    manifest_path: PathBuf,
    timeout: u32,
    options: Vec<String>,
}

impl PushCommand {
    pub(crate) fn new(
        app_dir: impl Into<PathBuf>,
        manifest_path: impl Into<PathBuf>,
        timeout: u32,
    ) -> Self {
        Self {
            app_dir: app_dir.into(),
            manifest_path: manifest_path.into(),
            timeout,
            options: Vec::new(),
        }
    }

    pub(crate) fn options<I: IntoIterator<Item = S>, S: Into<String>>(
        &mut self,
        options: I,
    ) -> &mut Self {
        self.options = options.into_iter().map(S::into).collect();
        self
    }
}

impl From<PushCommand> for Command {
    fn from(push_command: PushCommand) -> Self {
        let mut command = Command::new(CF);

        let mut args = vec![
            String::from("push"),
            String::from("-t"),
            push_command.timeout.to_string(),
            String::from("-f"),
            push_command.manifest_path.to_string_lossy().to_string(),
        ];
        args.extend(push_command.options);

        command.args(args);
        command.current_dir(push_command.app_dir);
        command
    }
}

/// Represents a `cf start` command.
#[derive(Clone, Debug)]
pub(crate) struct StartCommand {
    app_name: String,
}

impl StartCommand {
    pub(crate) fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
        }
    }
}

impl From<StartCommand> for Command {
    fn from(start_command: StartCommand) -> Self {
        let mut command = Command::new(CF);
        command.args(["start", &start_command.app_name]);
        command
    }
}

/// Represents a `cf restart` command.
#[derive(Clone, Debug)]
pub(crate) struct RestartCommand {
    app_name: String,
}

impl RestartCommand {
    pub(crate) fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
        }
    }
}

impl From<RestartCommand> for Command {
    fn from(restart_command: RestartCommand) -> Self {
        let mut command = Command::new(CF);
        command.args(["restart", &restart_command.app_name]);
        command
    }
}

/// Represents a `cf restage` command.
#[derive(Clone, Debug)]
pub(crate) struct RestageCommand {
    app_name: String,
}

impl RestageCommand {
    pub(crate) fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
        }
    }
}

impl From<RestageCommand> for Command {
    fn from(restage_command: RestageCommand) -> Self {
        let mut command = Command::new(CF);
        command.args(["restage", &restage_command.app_name]);
        command
    }
}

/// Represents a `cf env` command.
#[derive(Clone, Debug)]
pub(crate) struct EnvCommand {
    app_name: String,
}

impl EnvCommand {
    pub(crate) fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
        }
    }
}

impl From<EnvCommand> for Command {
    fn from(env_command: EnvCommand) -> Self {
        let mut command = Command::new(CF);
        command.args(["env", &env_command.app_name]);
        command
    }
}

/// Represents a `cf set-env` command.
#[derive(Clone, Debug)]
pub(crate) struct SetEnvCommand {
    app_name: String,
    variable_name: String,
    variable_value: String,
}

impl SetEnvCommand {
    pub(crate) fn new(
        app_name: impl Into<String>,
        variable_name: impl Into<String>,
        variable_value: impl Into<String>,
    ) -> Self {
        Self {
            app_name: app_name.into(),
            variable_name: variable_name.into(),
            variable_value: variable_value.into(),
        }
    }
}

impl From<SetEnvCommand> for Command {
    fn from(set_env_command: SetEnvCommand) -> Self {
        let mut command = Command::new(CF);
        command.args([
            "set-env",
            &set_env_command.app_name,
            &set_env_command.variable_name,
            &set_env_command.variable_value,
        ]);
        command
    }
}

/// Pushes an application to Cloud Foundry.
///
/// The CLI runs with its working directory set to `app_dir` and its output
/// passed through to this process' stdio, since a push is long-running and
/// meant for live observation. `options` is split on whitespace and appended
/// verbatim after the manifest flag. `timeout` is handed to the CLI's `-t`
/// flag; the adapter itself does not enforce it.
pub fn push(
    app_dir: impl AsRef<Path>,
    manifest_path: impl AsRef<Path>,
    options: &str,
    timeout: u32,
) -> Result<(), CommandError> {
    let mut push_command = PushCommand::new(app_dir.as_ref(), manifest_path.as_ref(), timeout);
    push_command.options(options.split_whitespace());

    run_command(Command::from(push_command), OutputPolicy::Inherit)?;
    Ok(())
}

/// Starts an application.
pub fn start(app_name: &str) -> Result<(), CommandError> {
    run_command(Command::from(StartCommand::new(app_name)), OutputPolicy::Capture)?;
    Ok(())
}

/// Restarts an application, passing the CLI's output through to this
/// process' stdio.
pub fn restart(app_name: &str) -> Result<(), CommandError> {
    run_command(
        Command::from(RestartCommand::new(app_name)),
        OutputPolicy::Inherit,
    )?;
    Ok(())
}

/// Restages an application, passing the CLI's output through to this
/// process' stdio.
pub fn restage(app_name: &str) -> Result<(), CommandError> {
    run_command(
        Command::from(RestageCommand::new(app_name)),
        OutputPolicy::Inherit,
    )?;
    Ok(())
}

/// Returns an application's environment configuration as raw text.
pub fn env(app_name: &str) -> Result<String, CommandError> {
    run_command(Command::from(EnvCommand::new(app_name)), OutputPolicy::Capture)
        .map(|log_output| log_output.stdout)
}

/// Sets an environment variable on an application, returning the CLI's
/// confirmation output as raw text.
pub fn set_env(
    app_name: &str,
    variable_name: &str,
    variable_value: &str,
) -> Result<String, CommandError> {
    run_command(
        Command::from(SetEnvCommand::new(app_name, variable_name, variable_value)),
        OutputPolicy::Capture,
    )
    .map(|log_output| log_output.stdout)
}
