//! Pure aggregation over fetched repository and contribution data:
//! ranked languages, weekly contribution series with streaks, repository
//! highlights, and elementwise repo totals.

use std::collections::{HashMap, HashSet};

use crate::models::graphql::{
    ContributionsCollection, LanguageRepositoryNode, PinnedRepositoryNode,
};
use crate::models::insights::{
    ContributionBreakdown, ContributionStats, Highlights, LanguageStat, RepoTotals,
    RepositoryHighlight, WeekTotal,
};
use crate::models::Repository;

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Ranks languages by byte volume from GraphQL language edges, counting a
/// repository at most once per language. Without graph data, falls back to
/// one unit per repository's reported primary language.
pub fn aggregate_languages(
    graph_repos: Option<&[LanguageRepositoryNode]>,
    repos: &[Repository],
) -> Vec<LanguageStat> {
    struct Accum {
        bytes: u64,
        color: Option<String>,
        repo_count: u32,
    }

    let mut by_name: HashMap<String, Accum> = HashMap::new();

    match graph_repos {
        Some(nodes) => {
            for node in nodes {
                let mut seen_in_repo: HashSet<&str> = HashSet::new();
                for edge in &node.languages.edges {
                    let entry = by_name
                        .entry(edge.node.name.clone())
                        .or_insert_with(|| Accum {
                            bytes: 0,
                            color: edge.node.color.clone(),
                            repo_count: 0,
                        });
                    entry.bytes += edge.size;
                    if seen_in_repo.insert(edge.node.name.as_str()) {
                        entry.repo_count += 1;
                    }
                }
            }
        }
        None => {
            // No byte granularity: one unit per repo's primary language.
            for repo in repos {
                if let Some(ref language) = repo.language {
                    let entry = by_name.entry(language.clone()).or_insert_with(|| Accum {
                        bytes: 0,
                        color: None,
                        repo_count: 0,
                    });
                    entry.bytes += 1;
                    entry.repo_count += 1;
                }
            }
        }
    }

    let total_bytes: u64 = by_name.values().map(|a| a.bytes).sum();

    let mut stats: Vec<LanguageStat> = by_name
        .into_iter()
        .map(|(name, accum)| LanguageStat {
            percentage: if total_bytes == 0 {
                0.0
            } else {
                round2(accum.bytes as f64 / total_bytes as f64 * 100.0)
            },
            name,
            bytes: accum.bytes,
            color: accum.color,
            repo_count: accum.repo_count,
        })
        .collect();

    // Name as secondary key only to keep equal-byte ordering stable
    // across the HashMap.
    stats.sort_by(|a, b| b.bytes.cmp(&a.bytes).then_with(|| a.name.cmp(&b.name)));
    stats.truncate(8);
    stats
}

pub fn aggregate_contributions(collection: &ContributionsCollection) -> ContributionStats {
    let calendar = &collection.contribution_calendar;

    let weeks: Vec<WeekTotal> = calendar
        .weeks
        .iter()
        .filter_map(|week| {
            let first = week.contribution_days.first()?;
            Some(WeekTotal {
                week_start: first.date,
                total: week.contribution_days.iter().map(|d| d.contribution_count).sum(),
            })
        })
        .collect();

    let last_year: u32 = weeks.iter().map(|w| w.total).sum();
    let weekly_average = if weeks.is_empty() {
        0.0
    } else {
        round2(last_year as f64 / weeks.len() as f64)
    };
    let weekly_max = weeks.iter().map(|w| w.total).max().unwrap_or(0);

    let mut days: Vec<_> = calendar
        .weeks
        .iter()
        .flat_map(|w| w.contribution_days.iter().cloned())
        .collect();
    days.sort_by_key(|d| d.date);

    // Single chronological scan: any zero-contribution day resets the
    // running streak.
    let mut current_streak = 0u32;
    let mut longest_streak = 0u32;
    for day in &days {
        if day.contribution_count > 0 {
            current_streak += 1;
            longest_streak = longest_streak.max(current_streak);
        } else {
            current_streak = 0;
        }
    }

    ContributionStats {
        total: calendar.total_contributions,
        last_year,
        weekly_average,
        weekly_max,
        weeks,
        current_streak,
        longest_streak,
        breakdown: ContributionBreakdown {
            commits: collection.total_commit_contributions,
            pull_requests: collection.total_pull_request_contributions,
            reviews: collection.total_pull_request_review_contributions,
            issues: collection.total_issue_contributions,
            restricted: collection.restricted_contributions_count,
        },
    }
}

pub fn sum_totals(repos: &[Repository]) -> RepoTotals {
    repos.iter().fold(RepoTotals::default(), |mut totals, repo| {
        totals.stars += repo.stargazers_count as u64;
        totals.forks += repo.forks_count as u64;
        totals.watchers += repo.watchers_count as u64;
        totals.open_issues += repo.open_issues_count as u64;
        totals
    })
}

/// Superlative picks over the fetched repository list. Ties keep the first
/// occurrence in pagination order (upstream's own ordering, deliberately
/// not re-sorted).
pub fn pick_highlights(
    repos: &[Repository],
    pinned: Option<&[PinnedRepositoryNode]>,
) -> Highlights {
    fn pick<'a>(
        repos: &'a [Repository],
        better: impl Fn(&Repository, &Repository) -> bool,
    ) -> Option<&'a Repository> {
        repos.iter().fold(None, |best, repo| match best {
            Some(current) if better(repo, current) => Some(repo),
            Some(current) => Some(current),
            None => Some(repo),
        })
    }

    Highlights {
        most_starred: pick(repos, |r, b| r.stargazers_count > b.stargazers_count)
            .map(repo_highlight),
        most_forked: pick(repos, |r, b| r.forks_count > b.forks_count).map(repo_highlight),
        oldest: pick(repos, |r, b| r.created_at < b.created_at).map(repo_highlight),
        newest: pick(repos, |r, b| r.updated_at > b.updated_at).map(repo_highlight),
        pinned: pinned
            .unwrap_or_default()
            .iter()
            .map(pinned_highlight)
            .collect(),
    }
}

pub fn repo_highlight(repo: &Repository) -> RepositoryHighlight {
    RepositoryHighlight {
        name: repo.name.clone(),
        description: repo.description.clone(),
        url: repo.html_url.clone(),
        stars: repo.stargazers_count,
        forks: repo.forks_count,
        language: repo.language.clone(),
        created_at: repo.created_at,
        updated_at: repo.updated_at,
        archived: repo.archived || repo.disabled,
    }
}

fn pinned_highlight(node: &PinnedRepositoryNode) -> RepositoryHighlight {
    RepositoryHighlight {
        name: node.name.clone(),
        description: node.description.clone(),
        url: node.url.clone(),
        stars: node.stargazer_count,
        // The pinned-items interface omits fork counts.
        forks: 0,
        language: node.primary_language.as_ref().map(|l| l.name.clone()),
        created_at: node.created_at,
        updated_at: node.updated_at,
        archived: false,
    }
}
