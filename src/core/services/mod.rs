pub mod issue_service;
pub mod quality_profile_service;
pub mod server_info_service;
pub mod types;

#[cfg(test)]
pub mod testing;

pub use issue_service::{IssueService, MAXIMUM_ISSUES_LIMIT};
pub use quality_profile_service::QualityProfileService;
pub use server_info_service::{STATUS_DOWN, ServerInfoService};
pub use types::ServiceContext;
