use crate::exec::{CF, CommandError, OutputPolicy, run_command};
use std::collections::BTreeMap;
use std::process::Command;

/// The labelled fields of a `cf target` report.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub enum TargetField {
    ApiEndpoint,
    User,
    Password,
    Org,
    Space,
}

impl TargetField {
    /// The label under which the field appears in `cf target` output and in
    /// map renditions of a [`TargetInfo`].
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            TargetField::ApiEndpoint => "API endpoint",
            TargetField::User => "User",
            TargetField::Password => "Password",
            TargetField::Org => "Org",
            TargetField::Space => "Space",
        }
    }

    fn from_label(label: &str) -> Option<Self> {
        match label {
            "API endpoint" => Some(TargetField::ApiEndpoint),
            "User" => Some(TargetField::User),
            "Password" => Some(TargetField::Password),
            "Org" => Some(TargetField::Org),
            "Space" => Some(TargetField::Space),
            _ => None,
        }
    }

    /// Fields involved in logging in: API endpoint and user, plus the
    /// password when `include_password` is set.
    #[must_use]
    pub fn login_fields(include_password: bool) -> Vec<TargetField> {
        let mut fields = vec![TargetField::ApiEndpoint, TargetField::User];
        if include_password {
            fields.push(TargetField::Password);
        }
        fields
    }

    /// Fields involved in targeting an org and a space.
    #[must_use]
    pub fn org_space_fields() -> Vec<TargetField> {
        vec![TargetField::Org, TargetField::Space]
    }
}

/// Access and context information for a Cloud Foundry installation.
///
/// `api_url` must point to the raw Cloud Controller, not to an endpoint
/// behind an auth gateway.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TargetInfo {
    pub api_url: String,
    pub password: String,
    pub user: String,
    pub org: String,
    pub space: String,
    /// Whether the TLS connection to the API should be verified. When false,
    /// `--skip-ssl-validation` is passed to `cf api`.
    pub tls_verify: bool,
    /// Whether [`login`] should re-authenticate (e.g. API URL or user changed).
    pub login_required: bool,
    /// Whether [`login`] should re-target org and space (e.g. either changed).
    pub target_required: bool,
}

impl TargetInfo {
    pub fn new(api_url: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            password: password.into(),
            user: String::from("admin"),
            org: String::from("seedorg"),
            space: String::from("seedspace"),
            tls_verify: false,
            login_required: true,
            target_required: false,
        }
    }

    /// Target information with every field empty, as reported when there is
    /// no usable session.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            api_url: String::new(),
            password: String::new(),
            user: String::new(),
            org: String::new(),
            space: String::new(),
            tls_verify: false,
            login_required: true,
            target_required: false,
        }
    }

    pub fn user(&mut self, user: impl Into<String>) -> &mut Self {
        self.user = user.into();
        self
    }

    pub fn org(&mut self, org: impl Into<String>) -> &mut Self {
        self.org = org.into();
        self
    }

    pub fn space(&mut self, space: impl Into<String>) -> &mut Self {
        self.space = space.into();
        self
    }

    pub fn tls_verify(&mut self, tls_verify: bool) -> &mut Self {
        self.tls_verify = tls_verify;
        self
    }

    pub fn login_required(&mut self, login_required: bool) -> &mut Self {
        self.login_required = login_required;
        self
    }

    pub fn target_required(&mut self, target_required: bool) -> &mut Self {
        self.target_required = target_required;
        self
    }

    /// Builds target information from a label-keyed map, as produced by
    /// [`TargetInfo::to_map`]. Missing keys become empty fields.
    #[must_use]
    pub fn from_map(
        map: &BTreeMap<String, String>,
        login_required: bool,
        target_required: bool,
    ) -> Self {
        let field = |target_field: TargetField| {
            map.get(target_field.label()).cloned().unwrap_or_default()
        };

        Self {
            api_url: field(TargetField::ApiEndpoint),
            password: field(TargetField::Password),
            user: field(TargetField::User),
            org: field(TargetField::Org),
            space: field(TargetField::Space),
            tls_verify: false,
            login_required,
            target_required,
        }
    }

    /// Renders the target information as a label-keyed map. The password is
    /// only included when explicitly requested.
    #[must_use]
    pub fn to_map(&self, include_password: bool) -> BTreeMap<String, String> {
        let mut map = BTreeMap::from([
            (
                String::from(TargetField::ApiEndpoint.label()),
                self.api_url.clone(),
            ),
            (String::from(TargetField::User.label()), self.user.clone()),
            (String::from(TargetField::Org.label()), self.org.clone()),
            (String::from(TargetField::Space.label()), self.space.clone()),
        ]);
        if include_password {
            map.insert(
                String::from(TargetField::Password.label()),
                self.password.clone(),
            );
        }
        map
    }

    fn set(&mut self, target_field: TargetField, value: impl Into<String>) {
        match target_field {
            TargetField::ApiEndpoint => self.api_url = value.into(),
            TargetField::User => self.user = value.into(),
            TargetField::Password => self.password = value.into(),
            TargetField::Org => self.org = value.into(),
            TargetField::Space => self.space = value.into(),
        }
    }
}

/// Represents a `cf api` command.
#[derive(Clone, Debug)]
pub(crate) struct ApiCommand {
    api_url: String,
    tls_verify: bool,
}

impl ApiCommand {
    pub(crate) fn new(api_url: impl Into<String>, tls_verify: bool) -> Self {
        Self {
            api_url: api_url.into(),
            tls_verify,
        }
    }
}

impl From<ApiCommand> for Command {
    fn from(api_command: ApiCommand) -> Self {
        let mut command = Command::new(CF);
        command.arg("api");

        if !api_command.tls_verify {
            command.arg("--skip-ssl-validation");
        }

        command.arg(&api_command.api_url);
        command
    }
}

/// Represents a `cf auth` command.
#[derive(Clone, Debug)]
pub(crate) struct AuthCommand {
    user: String,
    password: String,
}

impl AuthCommand {
    pub(crate) fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
        }
    }
}

impl From<AuthCommand> for Command {
    fn from(auth_command: AuthCommand) -> Self {
        let mut command = Command::new(CF);
        command.args(["auth", &auth_command.user, &auth_command.password]);
        command
    }
}

/// Represents a `cf target` command that sets org and space.
#[derive(Clone, Debug)]
pub(crate) struct SetTargetCommand {
    org: String,
    space: String,
}

impl SetTargetCommand {
    pub(crate) fn new(org: impl Into<String>, space: impl Into<String>) -> Self {
        Self {
            org: org.into(),
            space: space.into(),
        }
    }
}

impl From<SetTargetCommand> for Command {
    fn from(set_target_command: SetTargetCommand) -> Self {
        let mut command = Command::new(CF);
        command.args([
            "target",
            "-o",
            &set_target_command.org,
            "-s",
            &set_target_command.space,
        ]);
        command
    }
}

/// Represents an argument-less `cf target` command that reads the current target.
#[derive(Clone, Debug)]
pub(crate) struct GetTargetCommand;

impl From<GetTargetCommand> for Command {
    fn from(_: GetTargetCommand) -> Self {
        let mut command = Command::new(CF);
        command.arg("target");
        command
    }
}

/// Represents a `cf oauth-token` command.
#[derive(Clone, Debug)]
pub(crate) struct OauthTokenCommand;

impl From<OauthTokenCommand> for Command {
    fn from(_: OauthTokenCommand) -> Self {
        let mut command = Command::new(CF);
        command.arg("oauth-token");
        command
    }
}

/// Sets the target Cloud Foundry API URL for subsequent CLI commands.
///
/// The CLI's output is passed through to this process' stdio.
pub fn api(api_url: &str, tls_verify: bool) -> Result<(), CommandError> {
    run_command(
        Command::from(ApiCommand::new(api_url, tls_verify)),
        OutputPolicy::Inherit,
    )?;
    Ok(())
}

/// Authenticates against the currently targeted API as the given user.
///
/// The CLI's output is passed through to this process' stdio.
pub fn auth(user: &str, password: &str) -> Result<(), CommandError> {
    run_command(
        Command::from(AuthCommand::new(user, password)),
        OutputPolicy::Inherit,
    )?;
    Ok(())
}

/// Sets the target organization and space for subsequent CLI commands.
pub fn target(org: &str, space: &str) -> Result<(), CommandError> {
    run_command(
        Command::from(SetTargetCommand::new(org, space)),
        OutputPolicy::Capture,
    )?;
    Ok(())
}

/// Logs the CLI into the Cloud Foundry installation described by `target_info`.
///
/// Authentication (`cf api` + `cf auth`) only happens when `login_required`
/// is set; the org/space target is only changed when `target_required` is
/// set. The CLI's session state is mutated out-of-process as a side effect.
pub fn login(target_info: &TargetInfo) -> Result<(), CommandError> {
    if target_info.login_required {
        api(&target_info.api_url, target_info.tls_verify)?;
        auth(&target_info.user, &target_info.password)?;
    }
    if target_info.target_required {
        target(&target_info.org, &target_info.space)?;
    }
    Ok(())
}

/// Reads the CLI's current target (API endpoint, user, org, space).
///
/// This is a best-effort diagnostic read: any execution failure yields
/// [`TargetInfo::empty`] instead of an error, so "no session" and "command
/// failed" are indistinguishable here.
#[must_use]
pub fn current_target() -> TargetInfo {
    run_command(Command::from(GetTargetCommand), OutputPolicy::Capture)
        .map(|log_output| parse_target_output(&log_output.stdout))
        .unwrap_or_else(|_| TargetInfo::empty())
}

/// Returns the current user's OAuth token.
pub fn oauth_token() -> Result<String, CommandError> {
    let log_output = run_command(Command::from(OauthTokenCommand), OutputPolicy::Capture)?;
    Ok(log_output
        .stdout
        .lines()
        .last()
        .unwrap_or_default()
        .to_string())
}

/// Parses the free-text `cf target` report.
///
/// Non-empty lines are split on the first colon; lines whose label is not a
/// [`TargetField`] are dropped, and only the first whitespace-delimited token
/// of the value is kept (the CLI prints trailing annotations such as
/// `(API version: 2.50.0)` after some values).
fn parse_target_output(output: &str) -> TargetInfo {
    let mut target_info = TargetInfo::empty();

    for line in output.lines().filter(|line| !line.is_empty()) {
        if let Some((label, value)) = line.split_once(':') {
            if let Some(target_field) = TargetField::from_label(label) {
                target_info.set(
                    target_field,
                    value.split_whitespace().next().unwrap_or_default(),
                );
            }
        }
    }

    target_info
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use std::ffi::OsStr;

    #[test]
    fn from_api_command_to_command() {
        let command: Command = ApiCommand::new("https://api.example.com", true).into();
        assert_eq!(command.get_program(), "cf");
        assert_eq!(
            command.get_args().collect::<Vec<&OsStr>>(),
            ["api", "https://api.example.com"]
        );

        // The skip flag precedes the URL.
        let command: Command = ApiCommand::new("https://api.example.com", false).into();
        assert_eq!(
            command.get_args().collect::<Vec<&OsStr>>(),
            ["api", "--skip-ssl-validation", "https://api.example.com"]
        );
    }

    #[test]
    fn from_auth_command_to_command() {
        let command: Command = AuthCommand::new("admin", "hunter2").into();
        assert_eq!(command.get_program(), "cf");
        assert_eq!(
            command.get_args().collect::<Vec<&OsStr>>(),
            ["auth", "admin", "hunter2"]
        );
    }

    #[test]
    fn from_set_target_command_to_command() {
        let command: Command = SetTargetCommand::new("myorg", "myspace").into();
        assert_eq!(
            command.get_args().collect::<Vec<&OsStr>>(),
            ["target", "-o", "myorg", "-s", "myspace"]
        );
    }

    #[test]
    fn from_get_target_command_to_command() {
        let command: Command = GetTargetCommand.into();
        assert_eq!(command.get_args().collect::<Vec<&OsStr>>(), ["target"]);
    }

    #[test]
    fn from_oauth_token_command_to_command() {
        let command: Command = OauthTokenCommand.into();
        assert_eq!(command.get_args().collect::<Vec<&OsStr>>(), ["oauth-token"]);
    }

    #[test]
    fn parsing_a_target_report() {
        let output = indoc! {"
            API endpoint: https://api.example.com (API version: 2.50.0)
            User: admin
            Org: myorg
            Space: myspace
        "};

        let target_info = parse_target_output(output);

        assert_eq!(target_info.api_url, "https://api.example.com");
        assert_eq!(target_info.user, "admin");
        assert_eq!(target_info.org, "myorg");
        assert_eq!(target_info.space, "myspace");
        assert_eq!(target_info.password, "");
    }

    #[test]
    fn parsing_skips_unrecognized_labels_and_empty_lines() {
        let output = indoc! {"
            api endpoint: https://wrong.example.com

            Hint: use 'cf login' to log in
            Org: myorg
        "};

        let target_info = parse_target_output(output);

        assert_eq!(target_info.api_url, "");
        assert_eq!(target_info.org, "myorg");
    }

    #[test]
    fn map_round_trip_without_password() {
        let mut target_info = TargetInfo::new("https://api.example.com", "hunter2");
        target_info.org("myorg").space("myspace");

        let map = target_info.to_map(false);
        assert_eq!(
            map.keys().collect::<Vec<_>>(),
            ["API endpoint", "Org", "Space", "User"]
        );

        let rebuilt = TargetInfo::from_map(&map, true, false);
        assert_eq!(rebuilt.api_url, "https://api.example.com");
        assert_eq!(rebuilt.password, "");
        assert_eq!(rebuilt.org, "myorg");
    }

    #[test]
    fn map_includes_password_only_on_request() {
        let target_info = TargetInfo::new("https://api.example.com", "hunter2");

        assert_eq!(
            target_info.to_map(true).get("Password"),
            Some(&String::from("hunter2"))
        );
        assert_eq!(target_info.to_map(false).get("Password"), None);
    }

    #[test]
    fn login_fields_include_password_only_on_request() {
        assert_eq!(
            TargetField::login_fields(false),
            [TargetField::ApiEndpoint, TargetField::User]
        );
        assert_eq!(
            TargetField::login_fields(true),
            [
                TargetField::ApiEndpoint,
                TargetField::User,
                TargetField::Password
            ]
        );
    }
}
