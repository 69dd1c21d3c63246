use super::{ReportExporter, sanitize_file_name, write_file};
use crate::api::models::QualityProfile;
use crate::core::report::ReportModel;
use crate::error::ExportError;
use std::path::PathBuf;

/// Writes each quality profile's server export verbatim to
/// `<dir>/<language>-<profile name>.xml`.
///
/// Profile names repeat across languages, so the language is part of the
/// file name. Existing files are overwritten.
pub struct XmlExporter {
    dir: PathBuf,
}

impl XmlExporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn file_name(profile: &QualityProfile) -> String {
        format!(
            "{}.xml",
            sanitize_file_name(&format!(
                "{}-{}",
                profile.metadata.language, profile.metadata.name
            ))
        )
    }
}

impl ReportExporter for XmlExporter {
    fn export(&self, model: &ReportModel) -> Result<Vec<PathBuf>, ExportError> {
        let mut written = Vec::with_capacity(model.quality_profiles.len());

        for profile in &model.quality_profiles {
            let path = self.dir.join(Self::file_name(profile));
            write_file(&path, profile.data.configuration.as_bytes())?;
            log::debug!("Wrote profile '{}' to {}", profile.metadata.name, path.display());
            written.push(path);
        }

        Ok(written)
    }
}
