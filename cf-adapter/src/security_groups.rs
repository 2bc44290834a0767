use crate::exec::{CF, CommandError, OutputPolicy, run_command};
use std::path::PathBuf;
use std::process::Command;

/// Represents a `cf create-security-group` command.
#[derive(Clone, Debug)]
pub(crate) struct CreateSecurityGroupCommand {
    security_group: String,
    rules_path: PathBuf,
}

impl CreateSecurityGroupCommand {
    pub(crate) fn new(security_group: impl Into<String>, rules_path: impl Into<PathBuf>) -> Self {
        Self {
            security_group: security_group.into(),
            rules_path: rules_path.into(),
        }
    }
}

impl From<CreateSecurityGroupCommand> for Command {
    fn from(create_security_group_command: CreateSecurityGroupCommand) -> Self {
        let mut command = Command::new(CF);
        command.args([
            "create-security-group",
            &create_security_group_command.security_group,
            &create_security_group_command.rules_path.to_string_lossy(),
        ]);
        command
    }
}

/// Represents a `cf bind-security-group` command.
#[derive(Clone, Debug)]
pub(crate) struct BindSecurityGroupCommand {
    security_group: String,
    org: String,
    space: String,
}

impl BindSecurityGroupCommand {
    pub(crate) fn new(
        security_group: impl Into<String>,
        org: impl Into<String>,
        space: impl Into<String>,
    ) -> Self {
        Self {
            security_group: security_group.into(),
            org: org.into(),
            space: space.into(),
        }
    }
}

impl From<BindSecurityGroupCommand> for Command {
    fn from(bind_security_group_command: BindSecurityGroupCommand) -> Self {
        let mut command = Command::new(CF);
        command.args([
            "bind-security-group",
            &bind_security_group_command.security_group,
            &bind_security_group_command.org,
            &bind_security_group_command.space,
        ]);
        command
    }
}

/// Creates a security group from a JSON rules file (see `cf help
/// create-security-group` for the file's structure; it is not inspected
/// here).
pub fn create_security_group(
    security_group: &str,
    rules_path: impl Into<PathBuf>,
) -> Result<(), CommandError> {
    run_command(
        Command::from(CreateSecurityGroupCommand::new(security_group, rules_path)),
        OutputPolicy::Capture,
    )?;
    Ok(())
}

/// Binds a security group to a specific organization and space.
pub fn bind_security_group(
    security_group: &str,
    org: &str,
    space: &str,
) -> Result<(), CommandError> {
    run_command(
        Command::from(BindSecurityGroupCommand::new(security_group, org, space)),
        OutputPolicy::Capture,
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;

    #[test]
    fn from_create_security_group_command_to_command() {
        let command: Command =
            CreateSecurityGroupCommand::new("public-networks", "/tmp/rules.json").into();
        assert_eq!(command.get_program(), "cf");
        assert_eq!(
            command.get_args().collect::<Vec<&OsStr>>(),
            ["create-security-group", "public-networks", "/tmp/rules.json"]
        );
    }

    #[test]
    fn from_bind_security_group_command_to_command() {
        let command: Command =
            BindSecurityGroupCommand::new("public-networks", "myorg", "myspace").into();
        assert_eq!(
            command.get_args().collect::<Vec<&OsStr>>(),
            ["bind-security-group", "public-networks", "myorg", "myspace"]
        );
    }
}
