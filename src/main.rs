use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use gitduel::meme::caption_or_none;
use gitduel::models::{ComparisonResult, MetricDirection, UserInsights};
use gitduel::{CaptionService, Config, GitHubClient, ImgflipClient, InsightsService};

#[derive(Parser, Debug)]
#[command(name = "gitduel")]
#[command(version = "0.1.0")]
#[command(about = "Compare two GitHub profiles and crown a winner")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Output format (json, text)
    #[arg(short, long, default_value = "text", global = true)]
    format: String,

    /// Bypass the result cache
    #[arg(long, global = true)]
    force: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch aggregated insights for one user
    Insights {
        /// Username, @handle, or profile URL
        handle: String,
    },
    /// Compare two users head to head
    Compare {
        /// First user (winner framing is anchored to this side)
        user_a: String,
        /// Second user
        user_b: String,

        /// Render the meme verdict via Imgflip
        #[arg(long)]
        meme: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("gitduel=info".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let config = Config::from_env();

    let github = GitHubClient::new(config.github_token.as_deref(), config.max_repo_pages)?;
    let service = InsightsService::new(github, config.cache_ttl);

    match args.command {
        Command::Insights { ref handle } => {
            match service.get_insights(handle, args.force).await {
                Ok(insights) => print_insights(&insights, &args.format)?,
                Err(e) if e.is_not_found() => {
                    eprintln!("No GitHub user found for '{}'", handle);
                    std::process::exit(1);
                }
                Err(e) => return Err(e.into()),
            }
        }
        Command::Compare {
            ref user_a,
            ref user_b,
            meme,
        } => {
            let result = match service.compare(user_a, user_b, args.force).await {
                Ok(result) => result,
                Err(e) if e.is_not_found() => {
                    eprintln!("One of '{}' and '{}' does not exist on GitHub", user_a, user_b);
                    std::process::exit(1);
                }
                Err(e) => return Err(e.into()),
            };

            print_comparison(&result, &args.format)?;

            if meme {
                let imgflip = ImgflipClient::from_credentials(
                    config.imgflip_username.clone(),
                    config.imgflip_password.clone(),
                );
                let service = imgflip.as_ref().map(|c| c as &dyn CaptionService);

                match &result.meme_prompt {
                    Some(prompt) => match caption_or_none(service, prompt).await {
                        Some(image) => println!("\nMeme: {}", image.image_url),
                        None => println!("\nNo meme available"),
                    },
                    None => println!("\nNo meme available"),
                }
            }
        }
    }

    Ok(())
}

fn print_insights(insights: &UserInsights, format: &str) -> anyhow::Result<()> {
    match format {
        "json" => println!("{}", serde_json::to_string_pretty(insights)?),
        _ => print!("{}", format_insights(insights)),
    }
    Ok(())
}

fn print_comparison(result: &ComparisonResult, format: &str) -> anyhow::Result<()> {
    match format {
        "json" => println!("{}", serde_json::to_string_pretty(result)?),
        _ => print!("{}", format_comparison(result)),
    }
    Ok(())
}

fn format_insights(insights: &UserInsights) -> String {
    let mut output = String::new();

    output.push_str(&format!("\n=== {} ===\n\n", insights.handle));
    if let Some(ref name) = insights.display_name {
        output.push_str(&format!("Name: {}\n", name));
    }
    if let Some(ref bio) = insights.bio {
        output.push_str(&format!("Bio: {}\n", bio));
    }
    output.push_str(&format!(
        "Followers: {}  Following: {}  Public repos: {}\n",
        insights.followers, insights.following, insights.public_repos
    ));
    output.push_str(&format!(
        "Stars: {}  Forks: {}  Open issues: {}\n",
        insights.totals.stars, insights.totals.forks, insights.totals.open_issues
    ));

    if !insights.languages.is_empty() {
        output.push_str("\nLanguages:\n");
        for lang in &insights.languages {
            output.push_str(&format!("  {:<14} {:>6.2}%\n", lang.name, lang.percentage));
        }
    }

    match &insights.contributions {
        Some(c) => {
            output.push_str(&format!(
                "\nContributions: {} last year ({:.2}/week avg, {} max)\n",
                c.last_year, c.weekly_average, c.weekly_max
            ));
            output.push_str(&format!(
                "Streak: {} current, {} longest\n",
                c.current_streak, c.longest_streak
            ));
        }
        None => output.push_str("\nContribution stats unavailable (no token configured)\n"),
    }

    if let Some(ref top) = insights.highlights.most_starred {
        output.push_str(&format!("\nMost starred: {} ({} stars)\n", top.name, top.stars));
    }

    output
}

fn format_comparison(result: &ComparisonResult) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "\n=== {} vs {} ===\n\n",
        result.user_a.handle, result.user_b.handle
    ));

    for metric in &result.metrics {
        let marker = match metric.direction {
            MetricDirection::Up => ">",
            MetricDirection::Down => "<",
            MetricDirection::Equal => "=",
        };
        output.push_str(&format!(
            "  {:<30} {:>10.2} {} {:<10.2}\n",
            metric.label, metric.value_a, marker, metric.value_b
        ));
    }

    output.push_str(&format!("\n{}\n", result.summary));

    if let Some(ref prompt) = result.meme_prompt {
        output.push_str(&format!(
            "\nCaption (template {}):\n  {}\n  {}\n",
            prompt.template_id, prompt.top_text, prompt.bottom_text
        ));
    }

    output
}
