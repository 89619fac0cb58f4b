//! Rule-based summary sentence and meme caption prompt, driven by the
//! comparison outcome. Phrase and template choice is randomized within the
//! selected band; the rng is passed in so tests can seed it.

use rand::Rng;

use crate::compare::pick_runner_up;
use crate::models::{ComparisonMetric, MemePrompt, UserInsights};

/// Magnitude bands over the hero metric's absolute gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerdictBand {
    /// Gap > 100: a blowout.
    Dominant,
    /// Gap < 10: too close to gloat.
    Close,
    /// Everything in between.
    Upset,
    /// No hero metric at all.
    Tie,
}

impl VerdictBand {
    pub fn for_gap(gap: f64) -> Self {
        if gap > 100.0 {
            VerdictBand::Dominant
        } else if gap < 10.0 {
            VerdictBand::Close
        } else {
            VerdictBand::Upset
        }
    }

    /// Imgflip template ids curated per band.
    pub fn template_ids(self) -> &'static [&'static str] {
        match self {
            // Batman Slapping Robin, Success Kid, One Does Not Simply
            VerdictBand::Dominant => &["438680", "61544", "61579"],
            // Two Buttons, Drake Hotline Bling, Distracted Boyfriend
            VerdictBand::Close => &["87743020", "181913649", "112126428"],
            // Surprised Pikachu, Third World Skeptical Kid, Expanding Brain
            VerdictBand::Upset => &["155067746", "101288", "93895088"],
            // Mocking Spongebob, Is This A Pigeon, Change My Mind
            VerdictBand::Tie => &["102156234", "100777631", "129242436"],
        }
    }
}

struct PhraseContext {
    winner: String,
    loser: String,
    metric: String,
    winner_value: String,
    loser_value: String,
    gap: String,
    winner_lang: String,
    loser_lang: String,
    second_metric: Option<String>,
    second_gap: Option<String>,
}

const DOMINANT_PHRASES: &[(&str, &str)] = &[
    (
        "{winner} with {winner_value} {metric}",
        "{loser} still refreshing their {loser_lang} tutorial",
    ),
    (
        "{winner} pulls ahead by {gap} {metric}",
        "{loser} never stood a chance",
    ),
    (
        "watching {winner} stack {winner_value} {metric}",
        "{loser} sitting on {loser_value}",
    ),
];

const CLOSE_PHRASES: &[(&str, &str)] = &[
    (
        "{winner} edges out {loser} on {metric}",
        "by a whole {gap}, call the judges",
    ),
    (
        "{winner_value} vs {loser_value} {metric}",
        "{winner} wins the photo finish",
    ),
    (
        "{winner} writing {winner_lang}, {loser} writing {loser_lang}",
        "separated by just {gap} {metric}",
    ),
];

const UPSET_PHRASES: &[(&str, &str)] = &[
    (
        "{loser} thought {loser_value} {metric} was enough",
        "{winner} shows up with {winner_value}",
    ),
    (
        "{winner} takes {metric} by {gap}",
        "{loser} quietly closes the tab",
    ),
];

// Only usable when a supporting statistic exists.
const UPSET_SECOND_PHRASE: (&str, &str) = (
    "{winner} wins {metric} by {gap}",
    "and pads the lead with {second_gap} more {second_metric}",
);

const TIE_PHRASES: &[(&str, &str)] = &[
    (
        "{winner} vs {loser}",
        "seven metrics and nothing to show for it",
    ),
    (
        "is this a rivalry?",
        "{winner} and {loser} are statistically the same dev",
    ),
    (
        "{winner} writes {winner_lang}, {loser} writes {loser_lang}",
        "the scoreboard refuses to pick a side",
    ),
];

/// Values >= 1000 compact to one decimal plus a suffix ("12.3k"); smaller
/// values print as the raw rounded number.
pub fn format_value(value: f64) -> String {
    if value >= 1000.0 {
        format!("{:.1}k", value / 1000.0)
    } else if value.fract().abs() < f64::EPSILON {
        format!("{}", value as i64)
    } else {
        format!("{:.2}", value)
    }
}

fn top_language(user: &UserInsights) -> String {
    user.languages
        .first()
        .map(|l| l.name.clone())
        .unwrap_or_else(|| "???".to_string())
}

/// Winner framing is anchored to input order: the side with diff >= 0 is
/// user A.
fn winner_loser<'a>(
    a: &'a UserInsights,
    b: &'a UserInsights,
    hero: &ComparisonMetric,
) -> (&'a UserInsights, &'a UserInsights, f64, f64) {
    if hero.diff >= 0.0 {
        (a, b, hero.value_a, hero.value_b)
    } else {
        (b, a, hero.value_b, hero.value_a)
    }
}

pub fn summarize(a: &UserInsights, b: &UserInsights, hero: Option<&ComparisonMetric>) -> String {
    match hero {
        None => format!(
            "It's a dead heat: {} and {} match on every metric.",
            a.handle, b.handle
        ),
        Some(hero) => {
            let (winner, loser, _, _) = winner_loser(a, b, hero);
            format!(
                "{} takes it, ahead of {} by {} on {}.",
                winner.handle,
                loser.handle,
                format_value(hero.diff.abs()),
                hero.label.to_lowercase()
            )
        }
    }
}

pub fn meme_prompt(
    a: &UserInsights,
    b: &UserInsights,
    metrics: &[ComparisonMetric],
    hero: Option<&ComparisonMetric>,
    rng: &mut impl Rng,
) -> MemePrompt {
    let (band, ctx) = match hero {
        None => (
            VerdictBand::Tie,
            PhraseContext {
                winner: a.handle.clone(),
                loser: b.handle.clone(),
                metric: String::new(),
                winner_value: String::new(),
                loser_value: String::new(),
                gap: String::new(),
                winner_lang: top_language(a),
                loser_lang: top_language(b),
                second_metric: None,
                second_gap: None,
            },
        ),
        Some(hero) => {
            let (winner, loser, winner_value, loser_value) = winner_loser(a, b, hero);
            let second = pick_runner_up(metrics, hero);
            (
                VerdictBand::for_gap(hero.diff.abs()),
                PhraseContext {
                    winner: winner.handle.clone(),
                    loser: loser.handle.clone(),
                    metric: hero.label.to_lowercase(),
                    winner_value: format_value(winner_value),
                    loser_value: format_value(loser_value),
                    gap: format_value(hero.diff.abs()),
                    winner_lang: top_language(winner),
                    loser_lang: top_language(loser),
                    second_metric: second.map(|m| m.label.to_lowercase()),
                    second_gap: second.map(|m| format_value(m.diff.abs())),
                },
            )
        }
    };

    let templates = band.template_ids();
    let template_id = templates[rng.gen_range(0..templates.len())];

    let mut phrases: Vec<(&str, &str)> = match band {
        VerdictBand::Dominant => DOMINANT_PHRASES.to_vec(),
        VerdictBand::Close => CLOSE_PHRASES.to_vec(),
        VerdictBand::Upset => UPSET_PHRASES.to_vec(),
        VerdictBand::Tie => TIE_PHRASES.to_vec(),
    };
    if band == VerdictBand::Upset && ctx.second_metric.is_some() {
        phrases.push(UPSET_SECOND_PHRASE);
    }

    let (top, bottom) = phrases[rng.gen_range(0..phrases.len())];

    MemePrompt {
        template_id: template_id.to_string(),
        top_text: interpolate(top, &ctx),
        bottom_text: interpolate(bottom, &ctx),
    }
}

fn interpolate(template: &str, ctx: &PhraseContext) -> String {
    template
        .replace("{winner_value}", &ctx.winner_value)
        .replace("{loser_value}", &ctx.loser_value)
        .replace("{winner_lang}", &ctx.winner_lang)
        .replace("{loser_lang}", &ctx.loser_lang)
        .replace("{winner}", &ctx.winner)
        .replace("{loser}", &ctx.loser)
        .replace("{metric}", &ctx.metric)
        .replace("{gap}", &ctx.gap)
        .replace(
            "{second_metric}",
            ctx.second_metric.as_deref().unwrap_or(""),
        )
        .replace("{second_gap}", ctx.second_gap.as_deref().unwrap_or(""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::{build_metrics, pick_hero};
    use crate::models::insights::{Highlights, RepoTotals};
    use chrono::{TimeZone, Utc};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn insights(handle: &str, stars: u64, followers: u32, language: Option<&str>) -> UserInsights {
        UserInsights {
            handle: handle.to_string(),
            display_name: None,
            avatar_url: String::new(),
            profile_url: String::new(),
            bio: None,
            company: None,
            location: None,
            followers,
            following: 0,
            public_repos: 12,
            public_gists: 0,
            created_at: Utc.with_ymd_and_hms(2015, 6, 1, 0, 0, 0).unwrap(),
            totals: RepoTotals {
                stars,
                ..Default::default()
            },
            languages: language
                .map(|name| {
                    vec![crate::models::LanguageStat {
                        name: name.to_string(),
                        bytes: 1000,
                        percentage: 100.0,
                        color: None,
                        repo_count: 1,
                    }]
                })
                .unwrap_or_default(),
            contributions: None,
            highlights: Highlights::default(),
            repositories: Vec::new(),
        }
    }

    #[test]
    fn format_value_compacts_thousands() {
        assert_eq!(format_value(12_345.0), "12.3k");
        assert_eq!(format_value(1000.0), "1.0k");
        assert_eq!(format_value(150.0), "150");
        assert_eq!(format_value(3.5), "3.50");
    }

    #[test]
    fn band_thresholds() {
        assert_eq!(VerdictBand::for_gap(150.0), VerdictBand::Dominant);
        assert_eq!(VerdictBand::for_gap(100.0), VerdictBand::Upset);
        assert_eq!(VerdictBand::for_gap(10.0), VerdictBand::Upset);
        assert_eq!(VerdictBand::for_gap(9.99), VerdictBand::Close);
    }

    #[test]
    fn dominant_gap_names_winner_on_stars() {
        let a = insights("alice", 500, 10, Some("Rust"));
        let b = insights("bob", 350, 400, Some("Go"));
        let metrics = build_metrics(&a, &b);
        let hero = pick_hero(&metrics).unwrap();

        // followers gap is 390, stars gap only 150: followers wins the hero
        // pick; force the stars scenario instead with matched followers.
        assert_eq!(hero.id, "followers");

        let b_matched = insights("bob", 350, 10, Some("Go"));
        let metrics = build_metrics(&a, &b_matched);
        let hero = pick_hero(&metrics).unwrap();
        assert_eq!(hero.id, "total_stars");
        assert_eq!(hero.diff, 150.0);
        assert_eq!(VerdictBand::for_gap(hero.diff.abs()), VerdictBand::Dominant);

        let summary = summarize(&a, &b_matched, Some(hero));
        assert!(summary.starts_with("alice takes it"));
        assert!(summary.contains("total stars"));
    }

    #[test]
    fn losing_side_a_frames_b_as_winner() {
        let a = insights("alice", 100, 10, Some("Rust"));
        let b = insights("bob", 400, 10, Some("Go"));
        let metrics = build_metrics(&a, &b);
        let hero = pick_hero(&metrics).unwrap();

        let summary = summarize(&a, &b, Some(hero));
        assert!(summary.starts_with("bob takes it"));
    }

    #[test]
    fn tie_summary_names_both_users() {
        let a = insights("alice", 100, 10, Some("Rust"));
        let b = insights("bob", 100, 10, Some("Rust"));
        let metrics = build_metrics(&a, &b);
        assert!(pick_hero(&metrics).is_none());

        let summary = summarize(&a, &b, None);
        assert_eq!(
            summary,
            "It's a dead heat: alice and bob match on every metric."
        );
    }

    #[test]
    fn tie_prompt_uses_tie_band_templates() {
        let a = insights("alice", 100, 10, Some("Rust"));
        let b = insights("bob", 100, 10, None);
        let metrics = build_metrics(&a, &b);
        let mut rng = StdRng::seed_from_u64(7);

        let prompt = meme_prompt(&a, &b, &metrics, None, &mut rng);
        assert!(VerdictBand::Tie
            .template_ids()
            .contains(&prompt.template_id.as_str()));
        assert!(!prompt.top_text.contains('{'));
        assert!(!prompt.bottom_text.contains('{'));
    }

    #[test]
    fn prompt_is_deterministic_for_a_fixed_seed() {
        let a = insights("alice", 500, 10, Some("Rust"));
        let b = insights("bob", 350, 10, Some("Go"));
        let metrics = build_metrics(&a, &b);
        let hero = pick_hero(&metrics).unwrap();

        let first = meme_prompt(&a, &b, &metrics, Some(hero), &mut StdRng::seed_from_u64(42));
        let second = meme_prompt(&a, &b, &metrics, Some(hero), &mut StdRng::seed_from_u64(42));

        assert_eq!(first.template_id, second.template_id);
        assert_eq!(first.top_text, second.top_text);
        assert_eq!(first.bottom_text, second.bottom_text);
        assert!(VerdictBand::Dominant
            .template_ids()
            .contains(&first.template_id.as_str()));
    }

    #[test]
    fn missing_language_interpolates_placeholder() {
        let a = insights("alice", 500, 10, None);
        let b = insights("bob", 350, 10, None);
        let metrics = build_metrics(&a, &b);
        let hero = pick_hero(&metrics).unwrap();

        for seed in 0..16 {
            let prompt =
                meme_prompt(&a, &b, &metrics, Some(hero), &mut StdRng::seed_from_u64(seed));
            assert!(!prompt.top_text.contains("{winner_lang}"));
            assert!(!prompt.bottom_text.contains("{loser_lang}"));
        }
    }
}
