use crate::api::client::SonarClient;
use crate::cli::main_types::Commands;
use crate::core::context::ServerContext;
use crate::core::report::ReportCollector;
use crate::core::services::{IssueService, QualityProfileService, ServerInfoService, ServiceContext};
use crate::display::TableDisplay;
use crate::error::{AppError, CliError, ExportError};
use crate::export::{JsonExporter, ReportExporter, XmlExporter};
use crate::storage::config::{Config, Profile};
use crate::storage::credentials::Credentials;
use crate::utils::validation::{validate_project_key, validate_url};
use std::sync::Arc;

/// Connection values given on the command line; they win over the profile.
#[derive(Debug, Clone, Default)]
pub struct ConnectionOverrides {
    pub server: Option<String>,
    pub project: Option<String>,
    pub branch: Option<String>,
}

pub struct Dispatcher {
    config: Config,
    profile_name: Option<String>,
    credentials: Credentials,
    overrides: ConnectionOverrides,
}

impl Dispatcher {
    pub fn new(
        config: Config,
        profile_name: Option<String>,
        credentials: Credentials,
        overrides: ConnectionOverrides,
    ) -> Self {
        Self {
            config,
            profile_name,
            credentials,
            overrides,
        }
    }

    pub async fn dispatch(&self, command: Commands) -> Result<(), AppError> {
        match command {
            Commands::Report { output } => self.handle_report(&output).await,
            Commands::Issues {
                unconfirmed,
                raw,
                limit,
            } => self.handle_issues(unconfirmed, raw, limit).await,
            Commands::Facets => self.handle_facets().await,
            Commands::Profiles => self.handle_profiles().await,
            Commands::Status => self.handle_status().await,
        }
    }

    async fn handle_report(&self, output: &str) -> Result<(), AppError> {
        let context = self.service_context(true)?;
        let model = ReportCollector::new(context).collect().await?;

        let mut written = JsonExporter::new(output).export(&model)?;
        written.extend(XmlExporter::new(output).export(&model)?);

        println!("{}", TableDisplay::new().render_report_summary(&model));
        for path in written {
            println!("Wrote {}", path.display());
        }
        Ok(())
    }

    async fn handle_issues(&self, unconfirmed: bool, raw: bool, limit: usize) -> Result<(), AppError> {
        let service = IssueService::new(self.service_context(true)?);

        if raw {
            let issues = service.fetch_raw_issues().await?;
            let json = serde_json::to_string_pretty(&issues).map_err(|e| ExportError::Serialize {
                message: e.to_string(),
            })?;
            println!("{}", json);
            return Ok(());
        }

        let issues = if unconfirmed {
            service.fetch_unconfirmed_issues().await?
        } else {
            service.fetch_confirmed_issues().await?
        };

        if issues.is_empty() {
            println!("No issues found.");
            return Ok(());
        }

        println!("{}", TableDisplay::new().render_issue_list(&issues, Some(limit)));
        Ok(())
    }

    async fn handle_facets(&self) -> Result<(), AppError> {
        let service = IssueService::new(self.service_context(true)?);
        let facets = service.fetch_facets().await?;
        println!("{}", TableDisplay::new().render_facets(&facets));
        Ok(())
    }

    async fn handle_profiles(&self) -> Result<(), AppError> {
        let service = QualityProfileService::new(self.service_context(true)?);
        let profiles = service.fetch_quality_profiles().await?;

        if profiles.is_empty() {
            println!("No quality profiles found.");
            return Ok(());
        }

        println!("{}", TableDisplay::new().render_profiles(&profiles));
        Ok(())
    }

    async fn handle_status(&self) -> Result<(), AppError> {
        let service = ServerInfoService::new(self.service_context(false)?);
        let version = service.get_version().await?;
        let status = service.get_status().await;
        println!("{}", TableDisplay::new().render_status(&version, &status));
        Ok(())
    }

    /// The selected profile. Naming one that is not configured is an error.
    fn profile(&self) -> Result<Option<&Profile>, AppError> {
        match &self.profile_name {
            Some(name) => self.config.get_profile(name).map(Some).ok_or_else(|| {
                CliError::InvalidArguments(format!(
                    "Profile '{}' not found in the configuration file",
                    name
                ))
                .into()
            }),
            None => Ok(None),
        }
    }

    fn server_context(&self, require_project: bool) -> Result<ServerContext, AppError> {
        let profile = self.profile()?;

        let server_url = self
            .overrides
            .server
            .clone()
            .or_else(|| profile.map(|p| p.server_url.clone()))
            .ok_or_else(|| CliError::MissingValue {
                name: "server".to_string(),
                hint: "Pass --server or set server_url in a configuration profile".to_string(),
            })?;
        validate_url(&server_url)?;

        let project_key = match self.overrides.project.clone() {
            Some(project_key) => {
                validate_project_key(&project_key)?;
                project_key
            }
            None if require_project => {
                return Err(CliError::MissingValue {
                    name: "project".to_string(),
                    hint: "Pass --project with the project key".to_string(),
                }
                .into());
            }
            None => String::new(),
        };

        // An empty branch is sent as-is and selects the main branch.
        let branch = self
            .overrides
            .branch
            .clone()
            .or_else(|| profile.and_then(|p| p.branch.clone()))
            .unwrap_or_default();

        Ok(ServerContext::new(
            server_url,
            self.credentials.token().unwrap_or_default(),
            project_key,
            branch,
        ))
    }

    fn service_context(&self, require_project: bool) -> Result<ServiceContext, AppError> {
        let server = self.server_context(require_project)?;
        self.config.requests.validate()?;

        let timeout_secs = self
            .profile()?
            .and_then(|p| p.timeout_seconds)
            .unwrap_or(crate::api::client::DEFAULT_TIMEOUT_SECS);
        let client = client_for(&server, timeout_secs)?;

        log::debug!("Connecting with {:?}", server);
        Ok(ServiceContext::new(
            Arc::new(client),
            server,
            self.config.requests.clone(),
        ))
    }
}

/// Client authenticated with the context's token, the only copy used for requests.
fn client_for(server: &ServerContext, timeout_secs: u64) -> Result<SonarClient, AppError> {
    let token = Some(server.token().to_string());
    Ok(SonarClient::with_timeout(token, timeout_secs)?)
}
