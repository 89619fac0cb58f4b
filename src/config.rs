use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    /// Optional: GraphQL analytics (contributions, language bytes, pinned
    /// repos) are skipped entirely when no token is configured.
    pub github_token: Option<String>,
    pub imgflip_username: Option<String>,
    pub imgflip_password: Option<String>,
    pub cache_ttl: Duration,
    pub max_repo_pages: u32,
}

impl Config {
    pub fn from_env() -> Self {
        let github_token = env::var("GITHUB_TOKEN").ok().filter(|t| !t.is_empty());

        let imgflip_username = env::var("IMGFLIP_USERNAME").ok().filter(|v| !v.is_empty());
        let imgflip_password = env::var("IMGFLIP_PASSWORD").ok().filter(|v| !v.is_empty());

        let cache_ttl_secs = env::var("CACHE_TTL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(300);

        let max_repo_pages = env::var("MAX_REPO_PAGES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3);

        Self {
            github_token,
            imgflip_username,
            imgflip_password,
            cache_ttl: Duration::from_secs(cache_ttl_secs),
            max_repo_pages,
        }
    }
}
