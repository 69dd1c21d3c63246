use super::types::ServiceContext;
use crate::AppError;
use crate::api::models::{ProfileData, ProfileMetaData, ProjectStub, QualityProfile, Rule};
use crate::api::requests::{RequestKind, encode_segment};
use crate::core::pagination::{PaginatedFetch, take_array};
use crate::utils::error_helpers::protocol_error;
use std::collections::HashSet;

/// Fetches every quality profile used by the project together with its
/// configuration export, its active rules and the projects linked to it.
pub struct QualityProfileService {
    context: ServiceContext,
}

impl QualityProfileService {
    pub fn new(context: ServiceContext) -> Self {
        Self { context }
    }

    /// Profiles in the order the server lists them.
    ///
    /// Any failing sub-request fails the whole call; no profile is skipped.
    pub async fn fetch_quality_profiles(&self) -> Result<Vec<QualityProfile>, AppError> {
        let metadata = self.fetch_metadata().await?;
        log::info!("Collecting {} quality profile(s)", metadata.len());

        let mut profiles = Vec::with_capacity(metadata.len());
        for meta in metadata {
            let configuration = self.fetch_configuration(&meta).await?;
            let rules = self.fetch_rules(&meta).await?;
            let projects = self.fetch_projects(&meta).await?;

            log::debug!(
                "Profile '{}' ({}): {} rule(s), {} project(s)",
                meta.name,
                meta.language,
                rules.len(),
                projects.len()
            );

            profiles.push(QualityProfile::new(
                meta,
                ProfileData {
                    configuration,
                    rules,
                },
                projects,
            ));
        }

        Ok(profiles)
    }

    pub async fn fetch_metadata(&self) -> Result<Vec<ProfileMetaData>, AppError> {
        let url = self
            .context
            .url(RequestKind::QualityProfiles, &[&self.context.project_key()])?;
        let mut body = self.context.client.get_json(&url).await?;
        let metadata: Vec<ProfileMetaData> = take_array(&mut body, "profiles", &url)?;

        let mut seen = HashSet::new();
        if let Some(duplicate) = metadata.iter().find(|meta| !seen.insert(meta.key.as_str())) {
            return Err(protocol_error(
                &url,
                format!("quality profile key '{}' is listed twice", duplicate.key),
            )
            .into());
        }

        Ok(metadata)
    }

    /// Raw profile export; its format belongs to the server.
    pub async fn fetch_configuration(&self, meta: &ProfileMetaData) -> Result<String, AppError> {
        let url = self.context.url(
            RequestKind::ProfileConfiguration,
            &[&encode_segment(&meta.language), &encode_segment(&meta.name)],
        )?;

        Ok(self.context.client.get_text(&url).await?)
    }

    pub async fn fetch_rules(&self, meta: &ProfileMetaData) -> Result<Vec<Rule>, AppError> {
        let profile_key = encode_segment(&meta.key);
        let paged = PaginatedFetch::new(
            self.context.client.as_ref(),
            self.context.page_size(),
            "profile rules",
        )
        .run(
            |page, page_size| {
                self.context.url(
                    RequestKind::ProfileRules,
                    &[&profile_key, &page_size, &page],
                )
            },
            |url, mut body| take_array(&mut body, "rules", url),
        )
        .await?;

        Ok(paged.items)
    }

    pub async fn fetch_projects(&self, meta: &ProfileMetaData) -> Result<Vec<ProjectStub>, AppError> {
        let url = self.context.url(
            RequestKind::ProfileProjects,
            &[&encode_segment(&meta.key)],
        )?;
        let mut body = self.context.client.get_json(&url).await?;

        Ok(take_array(&mut body, "results", &url)?)
    }
}
