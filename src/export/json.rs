use super::{ReportExporter, sanitize_file_name, write_file};
use crate::core::report::ReportModel;
use crate::error::ExportError;
use std::path::PathBuf;

/// Writes the whole model as pretty JSON to `<dir>/<project key>-report.json`.
pub struct JsonExporter {
    dir: PathBuf,
}

impl JsonExporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn file_name(project_key: &str) -> String {
        format!("{}-report.json", sanitize_file_name(project_key))
    }
}

impl ReportExporter for JsonExporter {
    fn export(&self, model: &ReportModel) -> Result<Vec<PathBuf>, ExportError> {
        let json = serde_json::to_vec_pretty(model).map_err(|e| ExportError::Serialize {
            message: e.to_string(),
        })?;

        let path = self.dir.join(Self::file_name(&model.project_key));
        write_file(&path, &json)?;
        log::debug!("Wrote report to {}", path.display());

        Ok(vec![path])
    }
}
