use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Issue as reported by `api/issues/search`.
///
/// `language` is not sent by the server; it is filled from the rule
/// delivered on the same response page.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub key: String,
    #[serde(rename = "rule")]
    pub rule_key: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub severity: String,
    #[serde(rename = "type", default)]
    pub issue_type: String,
    #[serde(default)]
    pub component: String,
    #[serde(default)]
    pub project: String,
    #[serde(default)]
    pub line: Option<u32>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub resolution: Option<String>,
    #[serde(default)]
    pub effort: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub creation_date: Option<String>,
    #[serde(default)]
    pub update_date: Option<String>,
    #[serde(skip_deserializing)]
    pub language: String,
}

/// Untyped issue, kept exactly as the server sent it.
pub type RawIssue = Map<String, Value>;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub key: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "lang", default)]
    pub language: String,
    #[serde(rename = "langName", default)]
    pub language_name: String,
    #[serde(default)]
    pub severity: String,
    #[serde(rename = "type", default)]
    pub rule_type: String,
    #[serde(default)]
    pub html_desc: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProfileMetaData {
    pub key: String,
    pub name: String,
    pub language: String,
    #[serde(default)]
    pub language_name: String,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub active_rule_count: u64,
}

#[derive(Debug, Serialize, Clone, PartialEq, Default)]
pub struct ProfileData {
    /// Server-side profile export, passed through untouched.
    pub configuration: String,
    pub rules: Vec<Rule>,
}

/// Minimal project identity used to link a project to a profile.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct ProjectStub {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub selected: bool,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct QualityProfile {
    pub metadata: ProfileMetaData,
    pub data: ProfileData,
    pub projects: Vec<ProjectStub>,
}

impl QualityProfile {
    pub fn new(metadata: ProfileMetaData, data: ProfileData, projects: Vec<ProjectStub>) -> Self {
        Self {
            metadata,
            data,
            projects,
        }
    }

    pub fn key(&self) -> &str {
        &self.metadata.key
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct FacetValue {
    pub val: String,
    pub count: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Facet {
    pub property: String,
    #[serde(default)]
    pub values: Vec<FacetValue>,
}

/// Payload of `api/system/status`.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ServerInfo {
    #[serde(default)]
    pub id: Option<String>,
    pub version: Option<String>,
    pub status: Option<String>,
}
