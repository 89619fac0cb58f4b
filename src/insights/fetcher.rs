use std::sync::Arc;
use std::time::Duration;

use crate::cache::TtlCache;
use crate::compare::{build_metrics, pick_hero};
use crate::error::{Error, Result};
use crate::github::GitHubClient;
use crate::insights::aggregate::{
    aggregate_contributions, aggregate_languages, pick_highlights, repo_highlight, sum_totals,
};
use crate::models::graphql::AnalyticsUser;
use crate::models::{ComparisonResult, GitHubUser, Repository, UserInsights};
use crate::narrative;

/// The two entry points of the engine: per-user insights and two-user
/// comparisons, both cache-checked and read-only against upstream.
pub struct InsightsService {
    github: Arc<GitHubClient>,
    insights_cache: TtlCache<UserInsights>,
    comparison_cache: TtlCache<ComparisonResult>,
}

impl InsightsService {
    pub fn new(github: GitHubClient, cache_ttl: Duration) -> Self {
        Self {
            github: Arc::new(github),
            insights_cache: TtlCache::new(cache_ttl),
            comparison_cache: TtlCache::new(cache_ttl),
        }
    }

    /// Accepts a bare username, an `@`-prefixed handle, or a full profile
    /// URL; returns the bare handle.
    pub fn normalize_handle(raw: &str) -> Result<String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(Error::InvalidInput("handle must not be empty".to_string()));
        }

        let trimmed = trimmed.strip_prefix('@').unwrap_or(trimmed);

        // Profile URL: take the path segment right after the host.
        let handle = match trimmed.find("github.com/") {
            Some(idx) => {
                let rest = &trimmed[idx + "github.com/".len()..];
                rest.split(['/', '?', '#']).next().unwrap_or_default()
            }
            None => trimmed,
        };

        if handle.is_empty() {
            return Err(Error::InvalidInput(format!(
                "could not extract a handle from '{}'",
                raw.trim()
            )));
        }

        Ok(handle.to_string())
    }

    pub async fn get_insights(&self, raw_handle: &str, force: bool) -> Result<UserInsights> {
        let handle = Self::normalize_handle(raw_handle)?;
        let key = handle.to_lowercase();

        if force {
            self.insights_cache.clear(Some(&key)).await;
        }

        self.insights_cache
            .remember(&key, || self.fetch_insights(&handle))
            .await
    }

    pub async fn compare(
        &self,
        raw_a: &str,
        raw_b: &str,
        force: bool,
    ) -> Result<ComparisonResult> {
        let handle_a = Self::normalize_handle(raw_a)?;
        let handle_b = Self::normalize_handle(raw_b)?;

        // Pair order is significant: winner framing is anchored to input
        // order, so a::b and b::a are distinct entries.
        let key = format!(
            "{}::{}",
            handle_a.to_lowercase(),
            handle_b.to_lowercase()
        );

        if force {
            self.comparison_cache.clear(Some(&key)).await;
        }

        self.comparison_cache
            .remember(&key, || async move {
                let (user_a, user_b) = futures::try_join!(
                    self.get_insights(&handle_a, force),
                    self.get_insights(&handle_b, force),
                )?;

                let metrics = build_metrics(&user_a, &user_b);
                let hero = pick_hero(&metrics).cloned();
                let summary = narrative::summarize(&user_a, &user_b, hero.as_ref());

                let mut rng = rand::thread_rng();
                let meme_prompt = narrative::meme_prompt(
                    &user_a,
                    &user_b,
                    &metrics,
                    hero.as_ref(),
                    &mut rng,
                );

                Ok(ComparisonResult {
                    user_a,
                    user_b,
                    metrics,
                    hero_metric: hero,
                    summary,
                    meme_prompt: Some(meme_prompt),
                })
            })
            .await
    }

    /// Runs the three upstream fetches concurrently and merges them into
    /// one record.
    async fn fetch_insights(&self, handle: &str) -> Result<UserInsights> {
        let (user, repos, analytics) = futures::try_join!(
            self.github.get_user(handle),
            self.github.get_user_repos(handle),
            self.github.fetch_analytics(handle),
        )?;

        Ok(assemble_insights(user, repos, analytics))
    }
}

/// Merges the three fetch results into one record. Analytics may be absent
/// (no token configured): contribution stats stay `None` and languages fall
/// back to per-repo primary-language counting, while totals and highlights
/// still compute from the paginated data.
fn assemble_insights(
    user: GitHubUser,
    repos: Vec<Repository>,
    analytics: Option<AnalyticsUser>,
) -> UserInsights {
    let graph_repos = analytics
        .as_ref()
        .map(|a| a.repositories.nodes.as_slice());
    let languages = aggregate_languages(graph_repos, &repos);

    let contributions = analytics
        .as_ref()
        .map(|a| aggregate_contributions(&a.contributions_collection));

    let pinned = analytics.as_ref().map(|a| a.pinned_items.nodes.as_slice());
    let highlights = pick_highlights(&repos, pinned);

    tracing::info!(
        "Assembled insights for {}: {} repos, {} languages, analytics {}",
        user.login,
        repos.len(),
        languages.len(),
        if analytics.is_some() { "present" } else { "absent" },
    );

    UserInsights {
        handle: user.login,
        display_name: user.name,
        avatar_url: user.avatar_url,
        profile_url: user.html_url,
        bio: user.bio,
        company: user.company,
        location: user.location,
        followers: user.followers,
        following: user.following,
        public_repos: user.public_repos,
        public_gists: user.public_gists,
        created_at: user.created_at,
        totals: sum_totals(&repos),
        languages,
        contributions,
        highlights,
        repositories: repos.iter().map(repo_highlight).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn user(login: &str, followers: u32) -> GitHubUser {
        GitHubUser {
            login: login.to_string(),
            id: 1,
            name: Some("The Octocat".to_string()),
            avatar_url: "https://avatars.githubusercontent.com/u/583231".to_string(),
            html_url: format!("https://github.com/{}", login),
            bio: None,
            company: None,
            location: None,
            public_repos: 8,
            public_gists: 2,
            followers,
            following: 9,
            created_at: Utc.with_ymd_and_hms(2011, 1, 25, 0, 0, 0).unwrap(),
        }
    }

    fn repo(name: &str, stars: u32, language: Option<&str>) -> Repository {
        Repository {
            id: 1,
            name: name.to_string(),
            full_name: format!("octocat/{}", name),
            description: None,
            html_url: format!("https://github.com/octocat/{}", name),
            language: language.map(String::from),
            stargazers_count: stars,
            forks_count: 3,
            watchers_count: stars,
            open_issues_count: 1,
            fork: false,
            archived: false,
            disabled: false,
            created_at: Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn missing_analytics_degrades_without_losing_rest_data() {
        let repos = vec![
            repo("hello-world", 120, Some("Rust")),
            repo("spoon-knife", 40, Some("Rust")),
            repo("sandbox", 10, Some("Go")),
        ];

        let insights = assemble_insights(user("octocat", 50), repos, None);

        assert!(insights.contributions.is_none());

        // Languages fall back to primary-language counting.
        assert_eq!(insights.languages[0].name, "Rust");
        assert_eq!(insights.languages[0].repo_count, 2);
        assert_eq!(insights.languages[1].name, "Go");

        // Totals and highlights still compute from the paginated data.
        assert_eq!(insights.totals.stars, 170);
        assert_eq!(insights.totals.forks, 9);
        assert_eq!(
            insights.highlights.most_starred.as_ref().unwrap().name,
            "hello-world"
        );
        assert!(insights.highlights.pinned.is_empty());
        assert_eq!(insights.repositories.len(), 3);
        assert_eq!(insights.handle, "octocat");
        assert_eq!(insights.followers, 50);
    }

    #[test]
    fn url_and_bare_forms_normalize_identically() {
        let bare = InsightsService::normalize_handle("Octocat").unwrap();
        let url = InsightsService::normalize_handle("https://github.com/Octocat").unwrap();
        let url_with_path =
            InsightsService::normalize_handle("https://github.com/Octocat?tab=repositories")
                .unwrap();
        let at_form = InsightsService::normalize_handle("@Octocat").unwrap();

        assert_eq!(bare, url);
        assert_eq!(bare, url_with_path);
        assert_eq!(bare, at_form);
        assert_eq!(bare.to_lowercase(), "octocat");
    }

    #[test]
    fn trailing_url_segments_are_dropped() {
        let handle =
            InsightsService::normalize_handle("https://github.com/octocat/Hello-World").unwrap();
        assert_eq!(handle, "octocat");
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(
            InsightsService::normalize_handle("   "),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            InsightsService::normalize_handle("https://github.com/"),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            InsightsService::normalize_handle("@"),
            Err(Error::InvalidInput(_))
        ));
    }
}
