mod commands;
mod logging;
mod parse;
mod render;
mod tui;

use std::path::PathBuf;
use std::time::Duration;

use agenda_core::EventId;
use agenda_core::config::AgendaConfig;
use agenda_core::store::EventStore;
use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use crate::commands::Session;

/// How long a finished command waits for its outbound side calls.
const SIDE_CALL_GRACE: Duration = Duration::from_secs(3);

#[derive(Parser)]
#[command(name = "agenda")]
#[command(about = "Browse, add and search your agenda events")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct GlobalArgs {
    /// Config file (defaults to ~/.config/agenda/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Simulated latency for every operation (e.g. "0s", "150ms")
    #[arg(long, global = true, value_parser = humantime::parse_duration)]
    latency: Option<Duration>,

    /// Skip the outbound test call made on create/update/delete
    #[arg(long, global = true)]
    offline: bool,

    /// Start without the sample events
    #[arg(long, global = true)]
    empty: bool,

    /// Print JSON instead of formatted text
    #[arg(long, global = true)]
    json: bool,

    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all events by date
    List,
    /// Show one event
    Show { id: EventId },
    /// Add an event
    New {
        /// Event title (prompts for details when omitted)
        title: Option<String>,

        /// Date, e.g. "2025-11-28", "tomorrow", "fri 3pm" (defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Display time, e.g. "10:00 AM"
        #[arg(short, long)]
        time: Option<String>,

        #[arg(long)]
        description: Option<String>,

        /// Color tag such as "#98D8C8" (random when omitted)
        #[arg(long)]
        color: Option<String>,
    },
    /// Change fields of an event
    Edit {
        id: EventId,

        #[arg(long)]
        title: Option<String>,

        #[arg(short, long)]
        date: Option<String>,

        #[arg(short, long)]
        time: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        color: Option<String>,
    },
    /// Delete an event
    Delete {
        id: EventId,

        /// Don't ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Events on one day (defaults to today)
    Day { date: Option<String> },
    /// Calendar view of a month (defaults to the current month)
    Month {
        year: Option<i32>,

        #[arg(value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,

        /// Print the month's events as .ics instead
        #[arg(long)]
        ics: bool,
    },
    /// Find events by title or description
    Search { query: String },
    /// Print an event in shareable form
    Share {
        id: EventId,

        /// Print as .ics instead of text
        #[arg(long)]
        ics: bool,
    },
    /// Interactive session; changes last until you exit
    Shell,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.global.verbose);

    let store = build_store(&cli.global)?;
    let session = Session {
        store: &store,
        json: cli.global.json,
    };

    let result = match cli.command {
        Commands::Shell => commands::shell::run(&session).await,
        command => commands::run(&session, command).await,
    };

    // The runtime stops when main returns, taking unfinished side calls with it.
    store.flush(SIDE_CALL_GRACE).await;
    result
}

fn build_store(args: &GlobalArgs) -> Result<EventStore> {
    let mut config = match &args.config {
        Some(path) => AgendaConfig::load_from(path)?,
        None => AgendaConfig::load()?,
    };

    if let Some(latency) = args.latency {
        let ms = u64::try_from(latency.as_millis()).unwrap_or(u64::MAX);
        config.bulk_latency_ms = ms;
        config.point_latency_ms = ms;
    }
    if args.offline {
        config.probe_enabled = false;
    }
    if args.empty {
        config.seed = false;
    }

    tracing::debug!(?config, "loaded configuration");
    Ok(config.build_store()?)
}
