//! Command-line interface: argument parsing, progress display, and result
//! rendering.

use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::Config;
use crate::error::Result;
use crate::github::GitHubSearch;
use crate::judge::XaiClient;
use crate::models::RankedDeveloper;
use crate::query::{HeuristicInterpreter, QueryInterpreter};
use crate::ranking::{EnsembleWeights, ProgressSink, Ranker};

/// CRAKD - AI talent scout that finds and ranks cracked developers
#[derive(Parser, Debug)]
#[command(name = "crakd")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The search query (e.g., "cracked rust engineer")
    pub query: String,

    /// Number of developers to return
    #[arg(long, short = 'l')]
    pub limit: Option<usize>,

    /// Output format
    #[arg(long, short = 'O', value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Parse the query heuristically instead of with the AI parser
    #[arg(long)]
    pub simple_query: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors and results
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Config file path (default: ~/.config/crakd/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
}

/// Search, rank, and render: the whole single-command flow.
pub async fn run(cli: &Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    let limit = cli.limit.unwrap_or(config.search.limit);

    let judge = Arc::new(XaiClient::from_config(&config.judge)?);
    let interpreter: Arc<dyn QueryInterpreter> = if cli.simple_query {
        Arc::new(HeuristicInterpreter)
    } else {
        Arc::clone(&judge) as Arc<dyn QueryInterpreter>
    };

    let github = GitHubSearch::from_config(&config.github, interpreter)?;

    tracing::info!(query = %cli.query, limit, "starting CRAKD analysis");
    let developers = github.search(&cli.query, limit).await;

    if developers.is_empty() {
        tracing::warn!("no developers found matching the criteria");
        render(&[], cli.output_format)?;
        return Ok(());
    }

    let ranker = Ranker::new(
        judge,
        config.judge.timeout(),
        EnsembleWeights::from(&config.ranking),
    );

    let spinner = SpinnerProgress::stderr(cli.quiet);
    let ranked = ranker
        .rank_with_progress(
            &developers,
            &cli.query,
            spinner.as_ref().map(|s| s as &dyn ProgressSink),
        )
        .await?;
    if let Some(spinner) = &spinner {
        spinner.finish();
    }

    render(&ranked, cli.output_format)
}

/// Spinner-backed progress sink for interactive terminals.
pub struct SpinnerProgress {
    bar: ProgressBar,
}

impl SpinnerProgress {
    /// Create a spinner on stderr, or nothing when quiet or not a terminal.
    #[must_use]
    pub fn stderr(quiet: bool) -> Option<Self> {
        if quiet || !std::io::stderr().is_terminal() {
            return None;
        }

        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.enable_steady_tick(Duration::from_millis(120));
        Some(Self { bar })
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl ProgressSink for SpinnerProgress {
    fn update(&self, message: &str) {
        self.bar.set_message(message.to_string());
    }
}

fn render(ranked: &[RankedDeveloper], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(ranked)?);
        }
        OutputFormat::Human => render_human(ranked),
    }
    Ok(())
}

fn render_human(ranked: &[RankedDeveloper]) {
    if ranked.is_empty() {
        println!("{}", "No developers found matching the criteria.".yellow());
        return;
    }

    println!("{}", "--- CRACKED DEVELOPER RANKING ---".bold());
    for (position, dev) in ranked.iter().enumerate() {
        println!();
        println!(
            "{}",
            format!("--- Rank #{} ---", position + 1).bold().cyan()
        );
        println!("Username: {}", dev.username().green());
        if let Some(name) = &dev.profile.name {
            println!("Name: {name}");
        }
        if let Some(bio) = &dev.profile.bio {
            println!("Bio: {bio}");
        }
        println!("Followers: {}", dev.profile.followers);
        println!(
            "Ensemble Score: {} (AI: {:.0}, GitHub: {:.2})",
            format!("{:.2}", dev.ensemble_score).bold(),
            dev.cracked_score,
            dev.github_score,
        );
        if dev.analyzed {
            println!("Reasoning: {}", dev.reasoning);
        } else {
            println!("Reasoning: {}", "could not be analyzed".red());
        }
    }
    println!();
    println!("{}", "--- END OF RANKING ---".bold());
}
