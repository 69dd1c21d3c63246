use std::env;
use std::fmt;

/// Environment variable consulted when no token is given on the command line.
pub const TOKEN_ENV_VAR: &str = "SONAR_TOKEN";

/// Authentication token for one run. Only ever held in memory.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    token: Option<String>,
}

impl Credentials {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: token.filter(|t| !t.trim().is_empty()),
        }
    }

    /// Token from the command line, else from [`TOKEN_ENV_VAR`].
    pub fn resolve(cli_token: Option<String>) -> Self {
        Self::resolve_with(cli_token, env::var(TOKEN_ENV_VAR).ok())
    }

    fn resolve_with(cli_token: Option<String>, env_token: Option<String>) -> Self {
        let explicit = Self::new(cli_token);
        if explicit.has_token() {
            return explicit;
        }
        Self::new(env_token)
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &self.token.as_ref().map(|_| "***"))
            .finish()
    }
}
