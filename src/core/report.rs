//! Aggregate report model and the driver that fills it.

use crate::AppError;
use crate::api::models::{Facet, Issue, QualityProfile, RawIssue};
use crate::core::services::{
    IssueService, QualityProfileService, ServerInfoService, ServiceContext,
};
use serde::Serialize;

/// Everything acquired from the server for one project and branch.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportModel {
    pub project_key: String,
    pub branch: String,
    pub server_version: String,
    /// `"DOWN"` when the status could not be retrieved.
    pub server_status: String,
    pub issues: Vec<Issue>,
    pub unconfirmed_issues: Vec<Issue>,
    pub raw_issues: Vec<RawIssue>,
    pub facets: Vec<Facet>,
    pub quality_profiles: Vec<QualityProfile>,
}

pub struct ReportCollector {
    server_info: ServerInfoService,
    issues: IssueService,
    profiles: QualityProfileService,
    project_key: String,
    branch: String,
}

impl ReportCollector {
    pub fn new(context: ServiceContext) -> Self {
        Self {
            project_key: context.server.project_key().to_string(),
            branch: context.server.branch().to_string(),
            server_info: ServerInfoService::new(context.clone()),
            issues: IssueService::new(context.clone()),
            profiles: QualityProfileService::new(context),
        }
    }

    /// Run every acquisition in turn.
    ///
    /// The first propagated error aborts collection. Only the server status
    /// may degrade.
    pub async fn collect(&self) -> Result<ReportModel, AppError> {
        log::info!(
            "Collecting report for project '{}' (branch '{}')",
            self.project_key,
            self.branch
        );

        let server_version = self.server_info.get_version().await?;
        let server_status = self.server_info.get_status().await;
        let issues = self.issues.fetch_confirmed_issues().await?;
        let unconfirmed_issues = self.issues.fetch_unconfirmed_issues().await?;
        let raw_issues = self.issues.fetch_raw_issues().await?;
        let facets = self.issues.fetch_facets().await?;
        let quality_profiles = self.profiles.fetch_quality_profiles().await?;

        log::info!(
            "Collected {} issue(s), {} unconfirmed, {} quality profile(s)",
            issues.len(),
            unconfirmed_issues.len(),
            quality_profiles.len()
        );

        Ok(ReportModel {
            project_key: self.project_key.clone(),
            branch: self.branch.clone(),
            server_version,
            server_status,
            issues,
            unconfirmed_issues,
            raw_issues,
            facets,
            quality_profiles,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::requests::RequestCatalog;
    use crate::core::context::ServerContext;
    use crate::core::services::testing::ScriptedServer;
    use crate::error::ApiError;
    use serde_json::{Value, json};
    use std::sync::Arc;

    const BASE: &str = "http://sonar.test";

    fn issues_url(resolved: bool) -> String {
        format!(
            "{}/api/issues/search?componentKeys=proj&branch=main&ps=500&p=1&resolved={}&additionalFields=rules",
            BASE, resolved
        )
    }

    fn facets_url() -> String {
        format!(
            "{}/api/issues/search?componentKeys=proj&branch=main&resolved=false&facets=rules,severities,types,statuses,tags&ps=1&p=1",
            BASE
        )
    }

    fn issues_page(keys: &[&str]) -> Value {
        let issues: Vec<Value> = keys
            .iter()
            .map(|key| json!({"key": key, "rule": "java:S100"}))
            .collect();
        json!({
            "total": keys.len(),
            "issues": issues,
            "rules": [{"key": "java:S100", "lang": "java", "langName": "Java"}]
        })
    }

    /// A project with two issues, one unconfirmed issue and no profiles.
    fn scripted_project() -> ScriptedServer {
        ScriptedServer::new()
            .with_json(&issues_url(false), issues_page(&["i1", "i2"]))
            .with_json(&issues_url(true), issues_page(&["u1"]))
            .with_json(
                &facets_url(),
                json!({"facets": [{"property": "types", "values": [{"val": "BUG", "count": 2}]}]}),
            )
            .with_json(
                &format!("{}/api/qualityprofiles/search?project=proj", BASE),
                json!({"profiles": []}),
            )
    }

    fn collector(server: ScriptedServer) -> ReportCollector {
        ReportCollector::new(ServiceContext::new(
            Arc::new(server),
            ServerContext::new(BASE, "tok", "proj", "main"),
            RequestCatalog::default(),
        ))
    }

    #[tokio::test]
    async fn test_collect_full_model() {
        let server = scripted_project().with_json(
            &format!("{}/api/system/status", BASE),
            json!({"version": "10.4", "status": "UP"}),
        );

        let model = collector(server).collect().await.unwrap();

        assert_eq!(model.project_key, "proj");
        assert_eq!(model.branch, "main");
        assert_eq!(model.server_version, "10.4");
        assert_eq!(model.server_status, "UP");
        assert_eq!(model.issues.len(), 2);
        assert_eq!(model.issues[0].language, "Java");
        assert_eq!(model.unconfirmed_issues.len(), 1);
        assert_eq!(model.raw_issues.len(), 2);
        assert_eq!(model.facets[0].property, "types");
        assert!(model.quality_profiles.is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_status_endpoint_aborts_on_version() {
        let server = scripted_project().with_unreachable(&format!("{}/api/system/status", BASE));

        let result = collector(server).collect().await;

        assert!(matches!(
            result,
            Err(AppError::Api(ApiError::Transport { .. }))
        ));
    }

    #[tokio::test]
    async fn test_missing_status_field_degrades() {
        let server = scripted_project()
            .with_json(&format!("{}/api/system/status", BASE), json!({"version": "10.4"}));

        let model = collector(server).collect().await.unwrap();
        assert_eq!(model.server_status, "DOWN");
    }

    #[tokio::test]
    async fn test_failed_facets_abort_collection() {
        let server = scripted_project()
            .with_json(
                &format!("{}/api/system/status", BASE),
                json!({"version": "10.4", "status": "UP"}),
            )
            .with_status(&facets_url(), 500);

        let result = collector(server).collect().await;

        assert!(matches!(
            result,
            Err(AppError::Api(ApiError::Rejected { status: 500, .. }))
        ));
    }

    #[test]
    fn test_model_serializes_camel_case() {
        let model = ReportModel {
            project_key: "proj".to_string(),
            branch: "main".to_string(),
            server_version: "10.4".to_string(),
            server_status: "UP".to_string(),
            issues: vec![],
            unconfirmed_issues: vec![],
            raw_issues: vec![],
            facets: vec![],
            quality_profiles: vec![],
        };

        let value = serde_json::to_value(&model).unwrap();
        assert_eq!(value["projectKey"], "proj");
        assert_eq!(value["serverStatus"], "UP");
        assert!(value["qualityProfiles"].is_array());
    }
}
