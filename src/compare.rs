//! Head-to-head metric construction and hero-metric selection.

use crate::insights::aggregate::round2;
use crate::models::{ComparisonMetric, MetricDirection, UserInsights};

/// Differences at or below this are declared equal, absorbing 2-decimal
/// rounding noise.
const EQUAL_TOLERANCE: f64 = 0.01;

fn metric(id: &str, label: &str, description: &str, value_a: f64, value_b: f64) -> ComparisonMetric {
    let diff = round2(value_a - value_b);
    let direction = if diff.abs() <= EQUAL_TOLERANCE {
        MetricDirection::Equal
    } else if value_a > value_b {
        MetricDirection::Up
    } else {
        MetricDirection::Down
    };

    ComparisonMetric {
        id: id.to_string(),
        label: label.to_string(),
        description: Some(description.to_string()),
        value_a,
        value_b,
        diff,
        direction,
    }
}

fn weekly_average(user: &UserInsights) -> f64 {
    user.contributions
        .as_ref()
        .map(|c| c.weekly_average)
        .unwrap_or(0.0)
}

fn last_year(user: &UserInsights) -> f64 {
    user.contributions
        .as_ref()
        .map(|c| c.last_year as f64)
        .unwrap_or(0.0)
}

fn top_language_share(user: &UserInsights) -> f64 {
    user.languages.first().map(|l| l.percentage).unwrap_or(0.0)
}

fn pull_requests(user: &UserInsights) -> f64 {
    user.contributions
        .as_ref()
        .map(|c| c.breakdown.pull_requests as f64)
        .unwrap_or(0.0)
}

/// The seven fixed metrics, in order. Missing optional data substitutes 0
/// so every metric is always populated and comparable.
pub fn build_metrics(a: &UserInsights, b: &UserInsights) -> Vec<ComparisonMetric> {
    vec![
        metric(
            "public_repos",
            "Public repositories",
            "Public repositories owned by the user",
            a.public_repos as f64,
            b.public_repos as f64,
        ),
        metric(
            "total_stars",
            "Total stars",
            "Stars summed across owned repositories",
            a.totals.stars as f64,
            b.totals.stars as f64,
        ),
        metric(
            "followers",
            "Followers",
            "Follower count",
            a.followers as f64,
            b.followers as f64,
        ),
        metric(
            "weekly_contributions",
            "Average weekly contributions",
            "Mean contributions per week over the last year",
            weekly_average(a),
            weekly_average(b),
        ),
        metric(
            "contributions_last_year",
            "Contributions last year",
            "Total contributions in the observed window",
            last_year(a),
            last_year(b),
        ),
        metric(
            "top_language_share",
            "Top language share",
            "Percentage share of each user's most-used language",
            top_language_share(a),
            top_language_share(b),
        ),
        metric(
            "pull_requests",
            "Pull request contributions",
            "Pull requests opened in the observed window",
            pull_requests(a),
            pull_requests(b),
        ),
    ]
}

/// The metric with the largest absolute gap among those that are not equal;
/// ties keep the first occurrence in metric order. `None` when every metric
/// is equal.
pub fn pick_hero(metrics: &[ComparisonMetric]) -> Option<&ComparisonMetric> {
    metrics
        .iter()
        .filter(|m| m.direction != MetricDirection::Equal)
        .fold(None, |best: Option<&ComparisonMetric>, candidate| match best {
            Some(current) if candidate.diff.abs() > current.diff.abs() => Some(candidate),
            Some(current) => Some(current),
            None => Some(candidate),
        })
}

/// The next-largest-gap metric excluding the hero, used as a supporting
/// statistic in some captions.
pub fn pick_runner_up<'a>(
    metrics: &'a [ComparisonMetric],
    hero: &ComparisonMetric,
) -> Option<&'a ComparisonMetric> {
    metrics
        .iter()
        .filter(|m| m.id != hero.id && m.direction != MetricDirection::Equal)
        .fold(None, |best: Option<&ComparisonMetric>, candidate| match best {
            Some(current) if candidate.diff.abs() > current.diff.abs() => Some(candidate),
            Some(current) => Some(current),
            None => Some(candidate),
        })
}
