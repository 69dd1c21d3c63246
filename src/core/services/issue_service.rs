use super::types::ServiceContext;
use crate::AppError;
use crate::api::models::{Facet, Issue, RawIssue, Rule};
use crate::api::requests::RequestKind;
use crate::core::pagination::{Paged, PaginatedFetch, take_array, take_optional_array};

/// Most issues the server lets a client page through for one query.
pub const MAXIMUM_ISSUES_LIMIT: u64 = 10_000;

/// Issue search filter for real (unresolved) issues
const CONFIRMED: bool = false;
/// Issue search filter for issues resolved as false positive or won't fix
const UNCONFIRMED: bool = true;

/// Fetches issues, the rules they reference, and issue facets
pub struct IssueService {
    context: ServiceContext,
}

impl IssueService {
    pub fn new(context: ServiceContext) -> Self {
        Self { context }
    }

    /// All real issues of the project
    pub async fn fetch_confirmed_issues(&self) -> Result<Vec<Issue>, AppError> {
        self.fetch_issues(CONFIRMED).await
    }

    /// All issues marked as false positive or won't fix
    pub async fn fetch_unconfirmed_issues(&self) -> Result<Vec<Issue>, AppError> {
        self.fetch_issues(UNCONFIRMED).await
    }

    pub async fn fetch_issues(&self, resolved: bool) -> Result<Vec<Issue>, AppError> {
        Ok(self.fetch_issue_pages(resolved).await?.items)
    }

    /// Same as [`fetch_issues`](Self::fetch_issues) but keeps the paging
    /// outcome, including whether the issue cap was hit.
    pub async fn fetch_issue_pages(&self, resolved: bool) -> Result<Paged<Issue>, AppError> {
        PaginatedFetch::new(self.context.client.as_ref(), self.context.page_size(), "issues")
            .with_cap(MAXIMUM_ISSUES_LIMIT)
            .run(
                |page, page_size| self.issues_url(page, page_size, resolved),
                |url, mut body| {
                    let mut issues: Vec<Issue> = take_array(&mut body, "issues", url)?;
                    let rules: Vec<Rule> = take_optional_array(&mut body, "rules", url)?;
                    assign_languages(&mut issues, &rules);
                    Ok(issues)
                },
            )
            .await
    }

    /// Confirmed issues exactly as the server sent them, for passthrough export
    pub async fn fetch_raw_issues(&self) -> Result<Vec<RawIssue>, AppError> {
        let paged: Paged<RawIssue> =
            PaginatedFetch::new(self.context.client.as_ref(), self.context.page_size(), "raw issues")
                .with_cap(MAXIMUM_ISSUES_LIMIT)
                .run(
                    |page, page_size| self.issues_url(page, page_size, CONFIRMED),
                    |url, mut body| take_array(&mut body, "issues", url),
                )
                .await?;

        Ok(paged.items)
    }

    /// Aggregate issue counts per severity, type, rule and so on
    pub async fn fetch_facets(&self) -> Result<Vec<Facet>, AppError> {
        let url = self.context.url(
            RequestKind::Facets,
            &[&self.context.project_key(), &self.context.branch()],
        )?;
        let mut body = self.context.client.get_json(&url).await?;

        Ok(take_array(&mut body, "facets", &url)?)
    }

    fn issues_url(&self, page: u32, page_size: u32, resolved: bool) -> Result<String, AppError> {
        self.context.url(
            RequestKind::Issues,
            &[
                &self.context.project_key(),
                &self.context.branch(),
                &page_size,
                &page,
                &resolved,
            ],
        )
    }
}

/// Set each issue's language from the rules delivered with the same page.
///
/// An issue whose rule is not in `rules` keeps an empty language.
pub fn assign_languages(issues: &mut [Issue], rules: &[Rule]) {
    for issue in issues.iter_mut() {
        issue.language = find_language_of(&issue.rule_key, rules).to_string();
    }
}

fn find_language_of<'a>(rule_key: &str, rules: &'a [Rule]) -> &'a str {
    rules
        .iter()
        .find(|rule| rule.key == rule_key)
        .map(|rule| rule.language_name.as_str())
        .unwrap_or("")
}
