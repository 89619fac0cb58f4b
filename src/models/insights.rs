use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One user's normalized profile: base fields, repository totals, ranked
/// languages, optional contribution stats, and highlight picks. Built once
/// per cache miss and immutable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInsights {
    /// Case-preserved for display; cache keys use the lowercased form.
    pub handle: String,
    pub display_name: Option<String>,
    pub avatar_url: String,
    pub profile_url: String,
    pub bio: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub followers: u32,
    pub following: u32,
    pub public_repos: u32,
    pub public_gists: u32,
    pub created_at: DateTime<Utc>,
    pub totals: RepoTotals,
    pub languages: Vec<LanguageStat>,
    /// Absent when the GraphQL analytics interface is unavailable
    /// (no token configured).
    pub contributions: Option<ContributionStats>,
    pub highlights: Highlights,
    pub repositories: Vec<RepositoryHighlight>,
}

/// Elementwise sums over exactly the repositories returned by pagination
/// (capped at 3 pages of 100; a documented accuracy bound for larger
/// accounts, not a bug).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoTotals {
    pub stars: u64,
    pub forks: u64,
    pub watchers: u64,
    pub open_issues: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageStat {
    pub name: String,
    pub bytes: u64,
    pub percentage: f64,
    pub color: Option<String>,
    pub repo_count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionStats {
    pub total: u32,
    pub last_year: u32,
    pub weekly_average: f64,
    pub weekly_max: u32,
    pub weeks: Vec<WeekTotal>,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub breakdown: ContributionBreakdown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekTotal {
    pub week_start: NaiveDate,
    pub total: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionBreakdown {
    pub commits: u32,
    pub pull_requests: u32,
    pub reviews: u32,
    pub issues: u32,
    /// Private or otherwise invisible activity.
    pub restricted: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Highlights {
    pub most_starred: Option<RepositoryHighlight>,
    pub most_forked: Option<RepositoryHighlight>,
    pub oldest: Option<RepositoryHighlight>,
    pub newest: Option<RepositoryHighlight>,
    pub pinned: Vec<RepositoryHighlight>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryHighlight {
    pub name: String,
    pub description: Option<String>,
    pub url: String,
    pub stars: u32,
    pub forks: u32,
    pub language: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub archived: bool,
}
