//! Writers that turn a collected [`ReportModel`](crate::core::report::ReportModel)
//! into files.

pub mod json;
pub mod xml;

use crate::core::report::ReportModel;
use crate::error::ExportError;
use std::fs;
use std::path::{Path, PathBuf};

pub use json::JsonExporter;
pub use xml::XmlExporter;

pub trait ReportExporter {
    /// Write the model below the exporter's directory and return every file written.
    fn export(&self, model: &ReportModel) -> Result<Vec<PathBuf>, ExportError>;
}

/// Replace characters that are not safe in a file name with `_`.
pub fn sanitize_file_name(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    match sanitized.trim() {
        "" | "." | ".." => "_".to_string(),
        _ => sanitized,
    }
}

fn write_file(path: &Path, contents: &[u8]) -> Result<(), ExportError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| ExportError::Write {
            path: parent.to_string_lossy().to_string(),
            source,
        })?;
    }

    fs::write(path, contents).map_err(|source| ExportError::Write {
        path: path.to_string_lossy().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("Sonar way"), "Sonar way");
        assert_eq!(sanitize_file_name("team/java:strict"), "team_java_strict");
        assert_eq!(sanitize_file_name("a\tb"), "a_b");
        assert_eq!(sanitize_file_name(".."), "_");
        assert_eq!(sanitize_file_name(""), "_");
    }
}
