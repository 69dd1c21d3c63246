//! Input validation for values that end up in request URLs.

use crate::error::CliError;

/// Validate that a URL is properly formatted
pub fn validate_url(url: &str) -> crate::Result<()> {
    if url.is_empty() {
        return Err(CliError::InvalidArguments("URL cannot be empty".to_string()).into());
    }

    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(CliError::InvalidArguments(format!(
            "Invalid URL '{}': URL must start with http:// or https://",
            url
        ))
        .into());
    }

    Ok(())
}

/// Validate a project key: non-empty and free of whitespace.
pub fn validate_project_key(project_key: &str) -> crate::Result<()> {
    if project_key.is_empty() {
        return Err(CliError::InvalidArguments("Project key cannot be empty".to_string()).into());
    }

    if project_key.chars().any(char::is_whitespace) {
        return Err(CliError::InvalidArguments(format!(
            "Invalid project key '{}': whitespace is not allowed",
            project_key
        ))
        .into());
    }

    Ok(())
}
