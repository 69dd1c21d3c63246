//! Named request templates
//!
//! Every request issued against the server is built from one of the templates
//! below. A template is a URL pattern whose `{}` slots are filled in order.
//! Templates and the page size can be overridden from the `[requests]` table
//! of the configuration file.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Largest page the server accepts on its search endpoints.
pub const DEFAULT_PAGE_SIZE: u32 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// server, project, branch, page size, page, resolved
    Issues,
    /// server, project, branch
    Facets,
    /// server, project
    QualityProfiles,
    /// server, language, profile name
    ProfileConfiguration,
    /// server, profile key, page size, page
    ProfileRules,
    /// server, profile key
    ProfileProjects,
    /// server
    ServerInfo,
}

impl RequestKind {
    pub fn name(&self) -> &'static str {
        match self {
            RequestKind::Issues => "issues",
            RequestKind::Facets => "facets",
            RequestKind::QualityProfiles => "quality_profiles",
            RequestKind::ProfileConfiguration => "profile_configuration",
            RequestKind::ProfileRules => "profile_rules",
            RequestKind::ProfileProjects => "profile_projects",
            RequestKind::ServerInfo => "server_info",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RequestCatalog {
    pub page_size: u32,
    pub issues: String,
    pub facets: String,
    pub quality_profiles: String,
    pub profile_configuration: String,
    pub profile_rules: String,
    pub profile_projects: String,
    pub server_info: String,
}

impl Default for RequestCatalog {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            issues: "{}/api/issues/search?componentKeys={}&branch={}&ps={}&p={}&resolved={}&additionalFields=rules".to_string(),
            facets: "{}/api/issues/search?componentKeys={}&branch={}&resolved=false&facets=rules,severities,types,statuses,tags&ps=1&p=1".to_string(),
            quality_profiles: "{}/api/qualityprofiles/search?project={}".to_string(),
            profile_configuration: "{}/api/qualityprofiles/export?language={}&qualityProfile={}".to_string(),
            profile_rules: "{}/api/rules/search?qprofile={}&activation=true&f=name,lang,langName,severity,type,htmlDesc&ps={}&p={}".to_string(),
            profile_projects: "{}/api/qualityprofiles/projects?key={}".to_string(),
            server_info: "{}/api/system/status".to_string(),
        }
    }
}

impl RequestCatalog {
    pub fn template(&self, kind: RequestKind) -> &str {
        match kind {
            RequestKind::Issues => &self.issues,
            RequestKind::Facets => &self.facets,
            RequestKind::QualityProfiles => &self.quality_profiles,
            RequestKind::ProfileConfiguration => &self.profile_configuration,
            RequestKind::ProfileRules => &self.profile_rules,
            RequestKind::ProfileProjects => &self.profile_projects,
            RequestKind::ServerInfo => &self.server_info,
        }
    }

    /// Fill the template's slots with `args`, in order.
    pub fn render(&self, kind: RequestKind, args: &[&dyn Display]) -> Result<String, ConfigError> {
        let template = self.template(kind);
        let parts: Vec<&str> = template.split("{}").collect();
        let slots = parts.len() - 1;

        if slots != args.len() {
            return Err(ConfigError::InvalidValue {
                field: format!("requests.{}", kind.name()),
                value: template.to_string(),
                reason: format!(
                    "template has {} slot(s) but {} value(s) are required",
                    slots,
                    args.len()
                ),
            });
        }

        let mut url = String::with_capacity(template.len() + 64);
        for (part, arg) in parts.iter().zip(args.iter()) {
            url.push_str(part);
            url.push_str(&arg.to_string());
        }
        url.push_str(parts[slots]);

        Ok(url)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "requests.page_size".to_string(),
                value: "0".to_string(),
                reason: "page size must be greater than 0".to_string(),
            });
        }
        Ok(())
    }
}

/// Percent-encode a resource name before it is placed in a URL slot.
///
/// Spaces always come out as `%20`, never `+`.
pub fn encode_segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}
