use crate::exec::{CF, CommandError, OutputPolicy, run_command};
use std::process::Command;

/// Represents a `cf create-service` command.
#[derive(Clone, Debug)]
pub(crate) struct CreateServiceCommand {
    service_offering: String,
    plan: String,
    instance_name: String,
    params_json: Option<String>,
}

impl CreateServiceCommand {
    pub(crate) fn new(
        service_offering: impl Into<String>,
        plan: impl Into<String>,
        instance_name: impl Into<String>,
    ) -> Self {
        Self {
            service_offering: service_offering.into(),
            plan: plan.into(),
            instance_name: instance_name.into(),
            params_json: None,
        }
    }

    pub(crate) fn params_json(&mut self, params_json: impl Into<String>) -> &mut Self {
        self.params_json = Some(params_json.into());
        self
    }
}

impl From<CreateServiceCommand> for Command {
    fn from(create_service_command: CreateServiceCommand) -> Self {
        let mut command = Command::new(CF);
        command.args([
            "create-service",
            &create_service_command.service_offering,
            &create_service_command.plan,
            &create_service_command.instance_name,
        ]);

        if let Some(params_json) = create_service_command.params_json {
            command.args(["-c", &params_json]);
        }

        command
    }
}

/// Represents a `cf bind-service` command.
#[derive(Clone, Debug)]
pub(crate) struct BindServiceCommand {
    app_name: String,
    instance_name: String,
}

impl BindServiceCommand {
    pub(crate) fn new(app_name: impl Into<String>, instance_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            instance_name: instance_name.into(),
        }
    }
}

impl From<BindServiceCommand> for Command {
    fn from(bind_service_command: BindServiceCommand) -> Self {
        let mut command = Command::new(CF);
        command.args([
            "bind-service",
            &bind_service_command.app_name,
            &bind_service_command.instance_name,
        ]);
        command
    }
}

/// Represents a `cf unbind-service` command.
#[derive(Clone, Debug)]
pub(crate) struct UnbindServiceCommand {
    app_name: String,
    instance_name: String,
}

impl UnbindServiceCommand {
    pub(crate) fn new(app_name: impl Into<String>, instance_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            instance_name: instance_name.into(),
        }
    }
}

impl From<UnbindServiceCommand> for Command {
    fn from(unbind_service_command: UnbindServiceCommand) -> Self {
        let mut command = Command::new(CF);
        command.args([
            "unbind-service",
            &unbind_service_command.app_name,
            &unbind_service_command.instance_name,
        ]);
        command
    }
}

/// Represents a `cf service` command.
#[derive(Clone, Debug)]
pub(crate) struct ServiceCommand {
    instance_name: String,
    guid: bool,
}

impl ServiceCommand {
    pub(crate) fn new(instance_name: impl Into<String>) -> Self {
        Self {
            instance_name: instance_name.into(),
            guid: false,
        }
    }

    pub(crate) fn guid(&mut self, guid: bool) -> &mut Self {
        self.guid = guid;
        self
    }
}

impl From<ServiceCommand> for Command {
    fn from(service_command: ServiceCommand) -> Self {
        let mut command = Command::new(CF);
        command.arg("service");

        if service_command.guid {
            command.arg("--guid");
        }

        command.arg(&service_command.instance_name);
        command
    }
}

/// Represents a `cf create-service-key` command.
#[derive(Clone, Debug)]
pub(crate) struct CreateServiceKeyCommand {
    instance_name: String,
    key_name: String,
}

impl CreateServiceKeyCommand {
    pub(crate) fn new(instance_name: impl Into<String>, key_name: impl Into<String>) -> Self {
        Self {
            instance_name: instance_name.into(),
            key_name: key_name.into(),
        }
    }
}

impl From<CreateServiceKeyCommand> for Command {
    fn from(create_service_key_command: CreateServiceKeyCommand) -> Self {
        let mut command = Command::new(CF);
        command.args([
            "create-service-key",
            &create_service_key_command.instance_name,
            &create_service_key_command.key_name,
        ]);
        command
    }
}

/// Represents a `cf delete-service-key` command. Always runs forced (`-f`),
/// without an interactive confirmation prompt.
#[derive(Clone, Debug)]
pub(crate) struct DeleteServiceKeyCommand {
    instance_name: String,
    key_name: String,
}

impl DeleteServiceKeyCommand {
    pub(crate) fn new(instance_name: impl Into<String>, key_name: impl Into<String>) -> Self {
        Self {
            instance_name: instance_name.into(),
            key_name: key_name.into(),
        }
    }
}

impl From<DeleteServiceKeyCommand> for Command {
    fn from(delete_service_key_command: DeleteServiceKeyCommand) -> Self {
        let mut command = Command::new(CF);
        command.args([
            "delete-service-key",
            &delete_service_key_command.instance_name,
            &delete_service_key_command.key_name,
            "-f",
        ]);
        command
    }
}

/// Represents a `cf create-user-provided-service` command.
#[derive(Clone, Debug)]
pub(crate) struct CreateUserProvidedServiceCommand {
    instance_name: String,
    credentials: String,
}

impl CreateUserProvidedServiceCommand {
    pub(crate) fn new(instance_name: impl Into<String>, credentials: impl Into<String>) -> Self {
        Self {
            instance_name: instance_name.into(),
            credentials: credentials.into(),
        }
    }
}

impl From<CreateUserProvidedServiceCommand> for Command {
    fn from(create_user_provided_service_command: CreateUserProvidedServiceCommand) -> Self {
        let mut command = Command::new(CF);
        command.args([
            "create-user-provided-service",
            &create_user_provided_service_command.instance_name,
            "-p",
            &create_user_provided_service_command.credentials,
        ]);
        command
    }
}

/// Represents a `cf update-user-provided-service` command.
#[derive(Clone, Debug)]
pub(crate) struct UpdateUserProvidedServiceCommand {
    instance_name: String,
    credentials: String,
}

impl UpdateUserProvidedServiceCommand {
    pub(crate) fn new(instance_name: impl Into<String>, credentials: impl Into<String>) -> Self {
        Self {
            instance_name: instance_name.into(),
            credentials: credentials.into(),
        }
    }
}

impl From<UpdateUserProvidedServiceCommand> for Command {
    fn from(update_user_provided_service_command: UpdateUserProvidedServiceCommand) -> Self {
        let mut command = Command::new(CF);
        command.args([
            "update-user-provided-service",
            &update_user_provided_service_command.instance_name,
            "-p",
            &update_user_provided_service_command.credentials,
        ]);
        command
    }
}

/// Represents a `cf create-service-broker` command.
#[derive(Clone, Debug)]
pub(crate) struct CreateServiceBrokerCommand {
    broker_name: String,
    user: String,
    password: String,
    url: String,
}

impl CreateServiceBrokerCommand {
    pub(crate) fn new(
        broker_name: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            broker_name: broker_name.into(),
            user: user.into(),
            password: password.into(),
            url: url.into(),
        }
    }
}

impl From<CreateServiceBrokerCommand> for Command {
    fn from(create_service_broker_command: CreateServiceBrokerCommand) -> Self {
        let mut command = Command::new(CF);
        command.args([
            "create-service-broker",
            &create_service_broker_command.broker_name,
            &create_service_broker_command.user,
            &create_service_broker_command.password,
            &create_service_broker_command.url,
        ]);
        command
    }
}

/// Represents a `cf update-service-broker` command.
#[derive(Clone, Debug)]
pub(crate) struct UpdateServiceBrokerCommand {
    broker_name: String,
    user: String,
    password: String,
    url: String,
}

impl UpdateServiceBrokerCommand {
    pub(crate) fn new(
        broker_name: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            broker_name: broker_name.into(),
            user: user.into(),
            password: password.into(),
            url: url.into(),
        }
    }
}

impl From<UpdateServiceBrokerCommand> for Command {
    fn from(update_service_broker_command: UpdateServiceBrokerCommand) -> Self {
        let mut command = Command::new(CF);
        command.args([
            "update-service-broker",
            &update_service_broker_command.broker_name,
            &update_service_broker_command.user,
            &update_service_broker_command.password,
            &update_service_broker_command.url,
        ]);
        command
    }
}

/// Represents a `cf delete-service-broker` command. Always runs forced
/// (`-f`), without an interactive confirmation prompt.
#[derive(Clone, Debug)]
pub(crate) struct DeleteServiceBrokerCommand {
    broker_name: String,
}

impl DeleteServiceBrokerCommand {
    pub(crate) fn new(broker_name: impl Into<String>) -> Self {
        Self {
            broker_name: broker_name.into(),
        }
    }
}

impl From<DeleteServiceBrokerCommand> for Command {
    fn from(delete_service_broker_command: DeleteServiceBrokerCommand) -> Self {
        let mut command = Command::new(CF);
        command.args([
            "delete-service-broker",
            &delete_service_broker_command.broker_name,
            "-f",
        ]);
        command
    }
}

/// Represents a `cf enable-service-access` command.
#[derive(Clone, Debug)]
pub(crate) struct EnableServiceAccessCommand {
    service_offering: String,
}

impl EnableServiceAccessCommand {
    pub(crate) fn new(service_offering: impl Into<String>) -> Self {
        Self {
            service_offering: service_offering.into(),
        }
    }
}

impl From<EnableServiceAccessCommand> for Command {
    fn from(enable_service_access_command: EnableServiceAccessCommand) -> Self {
        let mut command = Command::new(CF);
        command.args([
            "enable-service-access",
            &enable_service_access_command.service_offering,
        ]);
        command
    }
}

/// Creates a service instance from a marketplace offering and plan.
///
/// `params` is an optional pre-serialized JSON string with provisioning
/// parameters; it is handed to the CLI's `-c` flag unmodified and never
/// validated or interpreted by the adapter. Whether an already existing
/// instance is an error is decided by the CLI, not here.
pub fn create_service(
    service_offering: &str,
    plan: &str,
    instance_name: &str,
    params: Option<&str>,
) -> Result<(), CommandError> {
    let mut create_service_command = CreateServiceCommand::new(service_offering, plan, instance_name);
    if let Some(params) = params {
        create_service_command.params_json(params);
    }

    run_command(Command::from(create_service_command), OutputPolicy::Capture)?;
    Ok(())
}

/// Binds a service instance to an application.
pub fn bind_service(app_name: &str, instance_name: &str) -> Result<(), CommandError> {
    run_command(
        Command::from(BindServiceCommand::new(app_name, instance_name)),
        OutputPolicy::Capture,
    )?;
    Ok(())
}

/// Unbinds a service instance from an application.
pub fn unbind_service(app_name: &str, instance_name: &str) -> Result<(), CommandError> {
    run_command(
        Command::from(UnbindServiceCommand::new(app_name, instance_name)),
        OutputPolicy::Capture,
    )?;
    Ok(())
}

/// Returns service instance information as raw text.
pub fn service(instance_name: &str) -> Result<String, CommandError> {
    run_command(
        Command::from(ServiceCommand::new(instance_name)),
        OutputPolicy::Capture,
    )
    .map(|log_output| log_output.stdout)
}

/// Returns the GUID of a service instance (including user-provided ones) for
/// use in direct API calls.
pub fn service_guid(instance_name: &str) -> Result<String, CommandError> {
    let mut service_command = ServiceCommand::new(instance_name);
    service_command.guid(true);

    let log_output = run_command(Command::from(service_command), OutputPolicy::Capture)?;
    Ok(log_output
        .stdout
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_string())
}

/// Creates a key for a service instance.
pub fn create_service_key(instance_name: &str, key_name: &str) -> Result<(), CommandError> {
    run_command(
        Command::from(CreateServiceKeyCommand::new(instance_name, key_name)),
        OutputPolicy::Capture,
    )?;
    Ok(())
}

/// Deletes a key from a service instance without prompting.
pub fn delete_service_key(instance_name: &str, key_name: &str) -> Result<(), CommandError> {
    run_command(
        Command::from(DeleteServiceKeyCommand::new(instance_name, key_name)),
        OutputPolicy::Capture,
    )?;
    Ok(())
}

/// Creates a user-provided service holding the given credentials.
///
/// `credentials` is a pre-serialized JSON string, passed through to the
/// CLI's `-p` flag unmodified.
pub fn create_user_provided_service(
    instance_name: &str,
    credentials: &str,
) -> Result<(), CommandError> {
    run_command(
        Command::from(CreateUserProvidedServiceCommand::new(
            instance_name,
            credentials,
        )),
        OutputPolicy::Capture,
    )?;
    Ok(())
}

/// Updates the credentials held by a user-provided service.
pub fn update_user_provided_service(
    instance_name: &str,
    credentials: &str,
) -> Result<(), CommandError> {
    run_command(
        Command::from(UpdateUserProvidedServiceCommand::new(
            instance_name,
            credentials,
        )),
        OutputPolicy::Capture,
    )?;
    Ok(())
}

/// Registers a service broker under the given HTTP address.
pub fn create_service_broker(
    broker_name: &str,
    user: &str,
    password: &str,
    url: &str,
) -> Result<(), CommandError> {
    run_command(
        Command::from(CreateServiceBrokerCommand::new(
            broker_name,
            user,
            password,
            url,
        )),
        OutputPolicy::Capture,
    )?;
    Ok(())
}

/// Updates a registered service broker.
pub fn update_service_broker(
    broker_name: &str,
    user: &str,
    password: &str,
    url: &str,
) -> Result<(), CommandError> {
    run_command(
        Command::from(UpdateServiceBrokerCommand::new(
            broker_name,
            user,
            password,
            url,
        )),
        OutputPolicy::Capture,
    )?;
    Ok(())
}

/// Deregisters a service broker without prompting.
pub fn delete_service_broker(broker_name: &str) -> Result<(), CommandError> {
    run_command(
        Command::from(DeleteServiceBrokerCommand::new(broker_name)),
        OutputPolicy::Capture,
    )?;
    Ok(())
}

/// Enables access to every plan of a service offering for every organization.
pub fn enable_service_access(service_offering: &str) -> Result<(), CommandError> {
    run_command(
        Command::from(EnableServiceAccessCommand::new(service_offering)),
        OutputPolicy::Capture,
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;

    #[test]
    fn from_create_service_command_to_command() {
        let mut create_service_command = CreateServiceCommand::new("postgres", "small", "my-db");

        // Without provisioning parameters no `-c` pair is appended.
        let command: Command = create_service_command.clone().into();
        assert_eq!(command.get_program(), "cf");
        assert_eq!(
            command.get_args().collect::<Vec<&OsStr>>(),
            ["create-service", "postgres", "small", "my-db"]
        );

        // With parameters, `-c` follows the instance name immediately.
        create_service_command.params_json(r#"{"storage_gb": 10}"#);
        let command: Command = create_service_command.into();
        assert_eq!(
            command.get_args().collect::<Vec<&OsStr>>(),
            [
                "create-service",
                "postgres",
                "small",
                "my-db",
                "-c",
                r#"{"storage_gb": 10}"#
            ]
        );
    }

    #[test]
    fn from_bind_and_unbind_commands_to_commands() {
        let command: Command = BindServiceCommand::new("my-app", "my-db").into();
        assert_eq!(
            command.get_args().collect::<Vec<&OsStr>>(),
            ["bind-service", "my-app", "my-db"]
        );

        let command: Command = UnbindServiceCommand::new("my-app", "my-db").into();
        assert_eq!(
            command.get_args().collect::<Vec<&OsStr>>(),
            ["unbind-service", "my-app", "my-db"]
        );
    }

    #[test]
    fn from_service_command_to_command() {
        let mut service_command = ServiceCommand::new("my-db");

        let command: Command = service_command.clone().into();
        assert_eq!(
            command.get_args().collect::<Vec<&OsStr>>(),
            ["service", "my-db"]
        );

        // The GUID flag precedes the instance name.
        service_command.guid(true);
        let command: Command = service_command.into();
        assert_eq!(
            command.get_args().collect::<Vec<&OsStr>>(),
            ["service", "--guid", "my-db"]
        );
    }

    #[test]
    fn from_service_key_commands_to_commands() {
        let command: Command = CreateServiceKeyCommand::new("my-db", "my-key").into();
        assert_eq!(
            command.get_args().collect::<Vec<&OsStr>>(),
            ["create-service-key", "my-db", "my-key"]
        );

        let command: Command = DeleteServiceKeyCommand::new("my-db", "my-key").into();
        assert_eq!(
            command.get_args().collect::<Vec<&OsStr>>(),
            ["delete-service-key", "my-db", "my-key", "-f"]
        );
    }

    #[test]
    fn from_user_provided_service_commands_to_commands() {
        let credentials = r#"{"host": "db.example.com", "port": 5432}"#;

        let command: Command =
            CreateUserProvidedServiceCommand::new("my-ups", credentials).into();
        assert_eq!(
            command.get_args().collect::<Vec<&OsStr>>(),
            ["create-user-provided-service", "my-ups", "-p", credentials]
        );

        let command: Command =
            UpdateUserProvidedServiceCommand::new("my-ups", credentials).into();
        assert_eq!(
            command.get_args().collect::<Vec<&OsStr>>(),
            ["update-user-provided-service", "my-ups", "-p", credentials]
        );
    }

    #[test]
    fn from_service_broker_commands_to_commands() {
        let command: Command = CreateServiceBrokerCommand::new(
            "my-broker",
            "admin",
            "hunter2",
            "https://broker.example.com",
        )
        .into();
        assert_eq!(
            command.get_args().collect::<Vec<&OsStr>>(),
            [
                "create-service-broker",
                "my-broker",
                "admin",
                "hunter2",
                "https://broker.example.com"
            ]
        );

        let command: Command = UpdateServiceBrokerCommand::new(
            "my-broker",
            "admin",
            "hunter2",
            "https://broker.example.com",
        )
        .into();
        assert_eq!(
            command.get_args().collect::<Vec<&OsStr>>(),
            [
                "update-service-broker",
                "my-broker",
                "admin",
                "hunter2",
                "https://broker.example.com"
            ]
        );
    }

    #[test]
    fn from_delete_service_broker_command_to_command() {
        let command: Command = DeleteServiceBrokerCommand::new("my-broker").into();
        assert_eq!(
            command.get_args().collect::<Vec<&OsStr>>(),
            ["delete-service-broker", "my-broker", "-f"]
        );
    }

    #[test]
    fn from_enable_service_access_command_to_command() {
        let command: Command = EnableServiceAccessCommand::new("postgres").into();
        assert_eq!(
            command.get_args().collect::<Vec<&OsStr>>(),
            ["enable-service-access", "postgres"]
        );
    }
}
