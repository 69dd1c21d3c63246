use std::fmt;

/// Connection parameters shared read-only by every acquisition service.
///
/// Built once per report run; there are no setters.
#[derive(Clone, PartialEq, Eq)]
pub struct ServerContext {
    base_url: String,
    token: String,
    project_key: String,
    branch: String,
}

impl ServerContext {
    pub fn new(
        base_url: impl Into<String>,
        token: impl Into<String>,
        project_key: impl Into<String>,
        branch: impl Into<String>,
    ) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.into(),
            project_key: project_key.into(),
            branch: branch.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn project_key(&self) -> &str {
        &self.project_key
    }

    pub fn branch(&self) -> &str {
        &self.branch
    }
}

// Keeps the token out of debug logs.
impl fmt::Debug for ServerContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerContext")
            .field("base_url", &self.base_url)
            .field("token", &if self.token.is_empty() { "" } else { "***" })
            .field("project_key", &self.project_key)
            .field("branch", &self.branch)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_trailing_slash() {
        let context = ServerContext::new("http://sonar.test/", "tok", "proj", "main");
        assert_eq!(context.base_url(), "http://sonar.test");
        assert_eq!(context.token(), "tok");
        assert_eq!(context.project_key(), "proj");
        assert_eq!(context.branch(), "main");
    }

    #[test]
    fn test_debug_hides_token() {
        let context = ServerContext::new("http://sonar.test", "squ_secret", "proj", "main");
        let debug = format!("{:?}", context);
        assert!(!debug.contains("squ_secret"));
        assert!(debug.contains("***"));
    }
}
