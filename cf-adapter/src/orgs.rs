use crate::exec::{CF, CommandError, OutputPolicy, run_command};
use std::process::Command;

/// Represents a `cf create-org` command.
#[derive(Clone, Debug)]
pub(crate) struct CreateOrgCommand {
    org_name: String,
}

impl CreateOrgCommand {
    pub(crate) fn new(org_name: impl Into<String>) -> Self {
        Self {
            org_name: org_name.into(),
        }
    }
}

impl From<CreateOrgCommand> for Command {
    fn from(create_org_command: CreateOrgCommand) -> Self {
        let mut command = Command::new(CF);
        command.args(["create-org", &create_org_command.org_name]);
        command
    }
}

/// Represents a `cf create-space` command.
#[derive(Clone, Debug)]
pub(crate) struct CreateSpaceCommand {
    space_name: String,
    org_name: String,
}

impl CreateSpaceCommand {
    pub(crate) fn new(space_name: impl Into<String>, org_name: impl Into<String>) -> Self {
        Self {
            space_name: space_name.into(),
            org_name: org_name.into(),
        }
    }
}

impl From<CreateSpaceCommand> for Command {
    fn from(create_space_command: CreateSpaceCommand) -> Self {
        let mut command = Command::new(CF);
        command.args([
            "create-space",
            &create_space_command.space_name,
            "-o",
            &create_space_command.org_name,
        ]);
        command
    }
}

/// Represents a `cf org --guid` command.
#[derive(Clone, Debug)]
pub(crate) struct OrgGuidCommand {
    org_name: String,
}

impl OrgGuidCommand {
    pub(crate) fn new(org_name: impl Into<String>) -> Self {
        Self {
            org_name: org_name.into(),
        }
    }
}

impl From<OrgGuidCommand> for Command {
    fn from(org_guid_command: OrgGuidCommand) -> Self {
        let mut command = Command::new(CF);
        command.args(["org", "--guid", &org_guid_command.org_name]);
        command
    }
}

/// Creates an organization. Whether an already existing organization is an
/// error is decided by the CLI, not here.
pub fn create_org(org_name: &str) -> Result<(), CommandError> {
    run_command(
        Command::from(CreateOrgCommand::new(org_name)),
        OutputPolicy::Capture,
    )?;
    Ok(())
}

/// Creates a space within an organization.
pub fn create_space(space_name: &str, org_name: &str) -> Result<(), CommandError> {
    run_command(
        Command::from(CreateSpaceCommand::new(space_name, org_name)),
        OutputPolicy::Capture,
    )?;
    Ok(())
}

/// Returns the GUID of an organization for use in direct API calls.
pub fn org_guid(org_name: &str) -> Result<String, CommandError> {
    let log_output = run_command(
        Command::from(OrgGuidCommand::new(org_name)),
        OutputPolicy::Capture,
    )?;
    Ok(log_output
        .stdout
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;

    #[test]
    fn from_create_org_command_to_command() {
        let command: Command = CreateOrgCommand::new("myorg").into();
        assert_eq!(command.get_program(), "cf");
        assert_eq!(
            command.get_args().collect::<Vec<&OsStr>>(),
            ["create-org", "myorg"]
        );
    }

    #[test]
    fn from_create_space_command_to_command() {
        let command: Command = CreateSpaceCommand::new("myspace", "myorg").into();
        assert_eq!(
            command.get_args().collect::<Vec<&OsStr>>(),
            ["create-space", "myspace", "-o", "myorg"]
        );
    }

    #[test]
    fn from_org_guid_command_to_command() {
        let command: Command = OrgGuidCommand::new("myorg").into();
        assert_eq!(
            command.get_args().collect::<Vec<&OsStr>>(),
            ["org", "--guid", "myorg"]
        );
    }
}
