use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("CliError: {0}")]
    Cli(#[from] CliError),
    #[error("ApiError: {0}")]
    Api(#[from] ApiError),
    #[error("ConfigError: {0}")]
    Config(#[from] ConfigError),
    #[error("StorageError: {0}")]
    Storage(#[from] StorageError),
    #[error("ExportError: {0}")]
    Export(#[from] ExportError),
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
    #[error("Missing required value: {name}")]
    MissingValue { name: String, hint: String },
}

/// Failures raised while talking to the server.
///
/// `Transport`, `Timeout` and `Protocol` mean the exchange itself broke down;
/// `Rejected` and `Unauthorized` mean the server answered and refused.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Cannot reach server at {endpoint}: {message}")]
    Transport { endpoint: String, message: String },
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64, endpoint: String },
    #[error("Unexpected response from {endpoint}: {message}")]
    Protocol { endpoint: String, message: String },
    #[error("Request rejected: {status} {message}")]
    Rejected {
        status: u16,
        endpoint: String,
        message: String,
    },
    #[error("Authentication failed")]
    Unauthorized {
        status: u16,
        endpoint: String,
        server_message: String,
    },
}

impl ApiError {
    /// The server understood the request and refused it.
    pub fn is_rejected(&self) -> bool {
        matches!(
            self,
            ApiError::Rejected { .. } | ApiError::Unauthorized { .. }
        )
    }

    /// The exchange failed before a usable answer came back.
    pub fn is_transport(&self) -> bool {
        !self.is_rejected()
    }

    pub fn endpoint(&self) -> &str {
        match self {
            ApiError::Transport { endpoint, .. }
            | ApiError::Timeout { endpoint, .. }
            | ApiError::Protocol { endpoint, .. }
            | ApiError::Rejected { endpoint, .. }
            | ApiError::Unauthorized { endpoint, .. } => endpoint,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration value for '{field}': {value}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("File I/O error at {path}: {source}")]
    FileIo {
        path: String,
        source: std::io::Error,
    },
    #[error("Configuration parse error: {message}")]
    ConfigParseError { message: String },
    #[error("Configuration directory not found")]
    ConfigDirNotFound,
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Cannot write {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
    #[error("Serialization failed: {message}")]
    Serialize { message: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ErrorSeverity {
    Critical,
    High,
    Medium,
    Low,
}

impl ErrorSeverity {
    pub fn label(&self) -> &'static str {
        match self {
            ErrorSeverity::Critical => "CRITICAL",
            ErrorSeverity::High => "ERROR",
            ErrorSeverity::Medium => "WARNING",
            ErrorSeverity::Low => "INFO",
        }
    }
}

impl AppError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AppError::Cli(_) => ErrorSeverity::Medium,
            AppError::Api(api_error) => match api_error {
                ApiError::Unauthorized { .. } => ErrorSeverity::High,
                ApiError::Transport { .. } => ErrorSeverity::Critical,
                ApiError::Timeout { .. } => ErrorSeverity::Medium,
                ApiError::Rejected { status, .. } if *status >= 500 => ErrorSeverity::High,
                _ => ErrorSeverity::Medium,
            },
            AppError::Config(_) => ErrorSeverity::High,
            AppError::Storage(_) => ErrorSeverity::Medium,
            AppError::Export(_) => ErrorSeverity::High,
        }
    }

    pub fn display_friendly(&self) -> String {
        match self {
            AppError::Api(ApiError::Unauthorized { endpoint, .. }) => {
                format!("The server refused the token for {}", endpoint)
            }
            AppError::Api(ApiError::Transport { endpoint, .. }) => {
                format!("Server unreachable: {}", endpoint)
            }
            AppError::Cli(CliError::MissingValue { name, .. }) => {
                format!("Missing required value: {}", name)
            }
            _ => format!("{}", self),
        }
    }

    pub fn troubleshooting_hint(&self) -> Option<String> {
        match self {
            AppError::Api(ApiError::Unauthorized { .. }) => {
                Some("Check the token passed with --token or SONAR_TOKEN".to_string())
            }
            AppError::Api(e) if e.is_transport() => Some(format!(
                "Check that the server URL points to a running SonarQube server (request: {})",
                e.endpoint()
            )),
            AppError::Api(e) => Some(format!(
                "Check the project key and branch (request: {})",
                e.endpoint()
            )),
            AppError::Cli(CliError::MissingValue { hint, .. }) => Some(hint.clone()),
            AppError::Config(ConfigError::InvalidValue { reason, .. }) => Some(reason.clone()),
            _ => None,
        }
    }
}
