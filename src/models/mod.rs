pub mod comparison;
pub mod graphql;
pub mod insights;
pub mod user;

pub use comparison::{ComparisonMetric, ComparisonResult, MemePrompt, MetricDirection};
pub use insights::{
    ContributionStats, Highlights, LanguageStat, RepoTotals, RepositoryHighlight, UserInsights,
};
pub use user::{GitHubUser, Repository};
