use crate::exec::{CF, CommandError, OutputPolicy, run_command};
use std::path::PathBuf;
use std::process::Command;

/// A row of the `cf buildpacks` listing.
///
/// All fields are the raw tokens as printed by the CLI; nothing is coerced,
/// so `position`, `enabled` and `locked` stay textual.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BuildpackDescription {
    pub buildpack: String,
    pub position: String,
    pub enabled: String,
    pub locked: String,
    pub filename: String,
}

/// Represents an argument-less `cf buildpacks` command.
#[derive(Clone, Debug)]
pub(crate) struct BuildpacksCommand;

impl From<BuildpacksCommand> for Command {
    fn from(_: BuildpacksCommand) -> Self {
        let mut command = Command::new(CF);
        command.arg("buildpacks");
        command
    }
}

/// Represents a `cf create-buildpack` command. The new buildpack is always
/// enabled afterwards (`--enable` flag).
#[derive(Clone, Debug)]
pub(crate) struct CreateBuildpackCommand {
    buildpack_name: String,
    artifact_path: PathBuf,
    position: u32,
    enable: bool,
}

impl CreateBuildpackCommand {
    pub(crate) fn new(
        buildpack_name: impl Into<String>,
        artifact_path: impl Into<PathBuf>,
        position: u32,
    ) -> Self {
        Self {
            buildpack_name: buildpack_name.into(),
            artifact_path: artifact_path.into(),
            position,
            enable: true,
        }
    }
}

impl From<CreateBuildpackCommand> for Command {
    fn from(create_buildpack_command: CreateBuildpackCommand) -> Self {
        let mut command = Command::new(CF);
        command.args([
            "create-buildpack",
            &create_buildpack_command.buildpack_name,
            &create_buildpack_command.artifact_path.to_string_lossy(),
            &create_buildpack_command.position.to_string(),
        ]);

        if create_buildpack_command.enable {
            command.arg("--enable");
        }

        command
    }
}

/// Represents a `cf update-buildpack` command.
#[derive(Clone, Debug)]
pub(crate) struct UpdateBuildpackCommand {
    buildpack_name: String,
    artifact_path: PathBuf,
}

impl UpdateBuildpackCommand {
    pub(crate) fn new(
        buildpack_name: impl Into<String>,
        artifact_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            buildpack_name: buildpack_name.into(),
            artifact_path: artifact_path.into(),
        }
    }
}

impl From<UpdateBuildpackCommand> for Command {
    fn from(update_buildpack_command: UpdateBuildpackCommand) -> Self {
        let mut command = Command::new(CF);
        command.args([
            "update-buildpack",
            &update_buildpack_command.buildpack_name,
            "-p",
            &update_buildpack_command.artifact_path.to_string_lossy(),
        ]);
        command
    }
}

/// Lists the buildpacks available on the targeted installation.
pub fn buildpacks() -> Result<Vec<BuildpackDescription>, CommandError> {
    let log_output = run_command(Command::from(BuildpacksCommand), OutputPolicy::Capture)?;
    Ok(parse_buildpacks_output(&log_output.stdout))
}

/// Creates a buildpack from an artifact and enables it.
pub fn create_buildpack(
    buildpack_name: &str,
    artifact_path: impl Into<PathBuf>,
    position: u32,
) -> Result<(), CommandError> {
    run_command(
        Command::from(CreateBuildpackCommand::new(
            buildpack_name,
            artifact_path,
            position,
        )),
        OutputPolicy::Capture,
    )?;
    Ok(())
}

/// Replaces a buildpack's artifact.
pub fn update_buildpack(
    buildpack_name: &str,
    artifact_path: impl Into<PathBuf>,
) -> Result<(), CommandError> {
    run_command(
        Command::from(UpdateBuildpackCommand::new(buildpack_name, artifact_path)),
        OutputPolicy::Capture,
    )?;
    Ok(())
}

/// Parses the tabular `cf buildpacks` listing.
///
/// The first three lines are the request echo, a blank line and the column
/// header; the remaining lines map positionally onto
/// [`BuildpackDescription`] fields. The CLI's column count and order are
/// assumed fixed; rows with fewer tokens produce records with empty fields
/// rather than an error.
fn parse_buildpacks_output(output: &str) -> Vec<BuildpackDescription> {
    output
        .lines()
        .skip(3)
        .map(|buildpack_line| {
            let mut tokens = buildpack_line.split_whitespace();
            BuildpackDescription {
                buildpack: tokens.next().unwrap_or_default().to_string(),
                position: tokens.next().unwrap_or_default().to_string(),
                enabled: tokens.next().unwrap_or_default().to_string(),
                locked: tokens.next().unwrap_or_default().to_string(),
                filename: tokens.next().unwrap_or_default().to_string(),
            }
        })
        .collect()
}
