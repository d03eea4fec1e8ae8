//! stravax CLI
//!
//! Logs in, then prints a segment or its leaderboard.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use stravax::{
    Client,
    error::{AppError, Result},
    models::{Config, Credentials, Filter, Gender, Leaderboard, LeaderboardEntry, Segment},
};

/// stravax - Segment leaderboard retrieval
#[derive(Parser, Debug)]
#[command(name = "stravax", version, about = "Segment leaderboard retrieval")]
struct Cli {
    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Account email
    #[arg(long, env = "STRAVA_EMAIL", default_value = "")]
    email: String,

    /// Account password
    #[arg(long, env = "STRAVA_PASSWORD", default_value = "", hide_env_values = true)]
    password: String,

    /// API access token, needed for `segment`
    #[arg(long, env = "STRAVA_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show segment details from the API
    Segment {
        #[arg(long)]
        id: i64,
    },

    /// Show a segment leaderboard
    Leaderboard {
        #[arg(long)]
        id: i64,

        /// M, F, or empty for everyone
        #[arg(long, default_value = "")]
        gender: Gender,

        /// overall or current_year
        #[arg(long, default_value = "overall")]
        filter: Filter,

        /// Fetch only this page
        #[arg(long)]
        page: Option<u32>,

        /// Also show segment details from the page heading
        #[arg(long)]
        with_segment: bool,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

/// Start date as the leaderboard prints it, e.g. `Jun 1, 2017`.
const DATE_FORMAT: &str = "%b %-d, %Y";

fn init_logging(level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// `H:MM:SS` for an hour or more, `M:SS` below.
fn fmt_duration(seconds: i64) -> String {
    let (h, m, s) = (seconds / 3600, seconds % 3600 / 60, seconds % 60);
    if h > 0 {
        format!("{h}:{m:02}:{s:02}")
    } else {
        format!("{m}:{s:02}")
    }
}

fn segment_line(segment: &Segment) -> String {
    format!(
        "{} ({}): {:.2} km @ {:.2}%",
        segment.name,
        segment.id,
        segment.distance_km(),
        segment.average_grade_pct
    )
}

fn entry_line(entry: &LeaderboardEntry) -> String {
    format!(
        "{}) {}: {} ({})",
        entry.rank,
        entry.athlete.name,
        fmt_duration(entry.elapsed_time_seconds),
        entry.start_date.format(DATE_FORMAT)
    )
}

fn print_leaderboard(leaderboard: &Leaderboard, segment: Option<&Segment>, json: bool) -> Result<()> {
    if json {
        let value = serde_json::json!({
            "segment": segment,
            "leaderboard": leaderboard,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    if let Some(segment) = segment {
        println!("{}", segment_line(segment));
    }
    for entry in &leaderboard.entries {
        println!("{}", entry_line(entry));
    }
    println!("{} of {} entries", leaderboard.len(), leaderboard.entries_count);
    Ok(())
}

fn error_line(error: &AppError) -> String {
    format!("stravax: {error}")
}

#[tokio::main]
async fn main() {
    if let Err(e) = run(Cli::parse()).await {
        eprintln!("{}", error_line(&e));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    init_logging(if cli.verbose { "debug" } else { &config.logging.level });

    let credentials = Credentials {
        email: cli.email,
        password: cli.password,
        access_token: cli.token,
    };
    let mut client = Client::login(&config, &credentials).await?;

    match cli.command {
        Command::Segment { id } => {
            let segment = client.get_segment(id).await?;
            println!("{}", segment_line(&segment));
        }

        Command::Leaderboard {
            id,
            gender,
            filter,
            page,
            with_segment,
            json,
        } => {
            let (leaderboard, segment) = match (page, with_segment) {
                (Some(page), true) => {
                    let (board, segment) = client
                        .get_leaderboard_page_and_segment(id, gender, filter, page)
                        .await?;
                    (board, Some(segment))
                }
                (Some(page), false) => (
                    client.get_leaderboard_page(id, gender, filter, page).await?,
                    None,
                ),
                (None, true) => {
                    let (board, segment) =
                        client.get_leaderboard_and_segment(id, gender, filter).await?;
                    (board, Some(segment))
                }
                (None, false) => (client.get_leaderboard(id, gender, filter).await?, None),
            };
            print_leaderboard(&leaderboard, segment.as_ref(), json)?;
        }
    }

    log::info!("{} requests made", client.request_count());
    Ok(())
}
