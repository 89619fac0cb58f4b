//! Wire types for the combined GraphQL analytics query: contribution
//! calendar, per-repository language composition, and pinned repositories.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

/// GraphQL response wrapper
#[derive(Debug, Deserialize)]
pub struct GraphQLResponse<T> {
    pub data: Option<T>,
    pub errors: Option<Vec<GraphQLError>>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQLError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct AnalyticsQueryResponse {
    pub user: Option<AnalyticsUser>,
}

#[derive(Debug, Deserialize)]
pub struct AnalyticsUser {
    #[serde(rename = "contributionsCollection")]
    pub contributions_collection: ContributionsCollection,
    pub repositories: RepositoriesConnection,
    #[serde(rename = "pinnedItems")]
    pub pinned_items: PinnedItemsConnection,
}

#[derive(Debug, Deserialize)]
pub struct ContributionsCollection {
    #[serde(rename = "contributionCalendar")]
    pub contribution_calendar: ContributionCalendar,
    #[serde(rename = "totalCommitContributions")]
    pub total_commit_contributions: u32,
    #[serde(rename = "totalPullRequestContributions")]
    pub total_pull_request_contributions: u32,
    #[serde(rename = "totalPullRequestReviewContributions")]
    pub total_pull_request_review_contributions: u32,
    #[serde(rename = "totalIssueContributions")]
    pub total_issue_contributions: u32,
    #[serde(rename = "restrictedContributionsCount")]
    pub restricted_contributions_count: u32,
}

#[derive(Debug, Deserialize)]
pub struct ContributionCalendar {
    #[serde(rename = "totalContributions")]
    pub total_contributions: u32,
    pub weeks: Vec<CalendarWeek>,
}

#[derive(Debug, Deserialize)]
pub struct CalendarWeek {
    #[serde(rename = "contributionDays")]
    pub contribution_days: Vec<CalendarDay>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    #[serde(rename = "contributionCount")]
    pub contribution_count: u32,
}

#[derive(Debug, Deserialize)]
pub struct RepositoriesConnection {
    pub nodes: Vec<LanguageRepositoryNode>,
}

#[derive(Debug, Deserialize)]
pub struct LanguageRepositoryNode {
    pub name: String,
    pub languages: LanguagesConnection,
}

#[derive(Debug, Deserialize)]
pub struct LanguagesConnection {
    pub edges: Vec<LanguageEdge>,
}

#[derive(Debug, Deserialize)]
pub struct LanguageEdge {
    pub size: u64,
    pub node: LanguageNode,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LanguageNode {
    pub name: String,
    pub color: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PinnedItemsConnection {
    pub nodes: Vec<PinnedRepositoryNode>,
}

/// Pinned repository node. The pinned-items interface does not expose a
/// fork count, so highlights built from it default `forks` to 0.
#[derive(Debug, Deserialize)]
pub struct PinnedRepositoryNode {
    pub name: String,
    pub description: Option<String>,
    pub url: String,
    #[serde(rename = "stargazerCount")]
    pub stargazer_count: u32,
    #[serde(rename = "primaryLanguage")]
    pub primary_language: Option<LanguageNode>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}
