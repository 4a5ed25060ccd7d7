pub mod day;
pub mod delete;
pub mod edit;
pub mod list;
pub mod month;
pub mod new;
pub mod search;
pub mod share;
pub mod shell;
pub mod show;

use std::future::Future;

use agenda_core::store::EventStore;
use agenda_core::{Color, Event, Latency};
use anyhow::Result;
use serde::Serialize;

use crate::Commands;
use crate::render::Render;
use crate::tui;

/// What every command runs against: the store and the output mode.
pub struct Session<'a> {
    pub store: &'a EventStore,
    pub json: bool,
}

impl Session<'_> {
    /// Await a store call, behind a spinner in text mode.
    pub async fn wait<F: Future>(&self, message: &str, fut: F) -> F::Output {
        if self.json || self.store.latency() == Latency::none() {
            fut.await
        } else {
            tui::with_spinner(message, fut).await
        }
    }

    pub fn print_json<T: Serialize>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    /// Print a flat list of events, or JSON.
    pub fn print_events(&self, events: &[Event], empty_message: &str) -> Result<()> {
        if self.json {
            return self.print_json(&events);
        }

        if events.is_empty() {
            use owo_colors::OwoColorize;
            println!("{}", empty_message.dimmed());
            return Ok(());
        }

        for event in events {
            println!("{}", event.render());
        }
        Ok(())
    }
}

pub async fn run(session: &Session<'_>, command: Commands) -> Result<()> {
    match command {
        Commands::List => list::run(session).await,
        Commands::Show { id } => show::run(session, id).await,
        Commands::New {
            title,
            date,
            time,
            description,
            color,
        } => {
            let args = new::NewArgs {
                title,
                date,
                time,
                description,
                color: color.map(Color::new),
            };
            new::run(session, args).await
        }
        Commands::Edit {
            id,
            title,
            date,
            time,
            description,
            color,
        } => {
            let args = edit::EditArgs {
                title,
                date,
                time,
                description,
                color: color.map(Color::new),
            };
            edit::run(session, id, args).await
        }
        Commands::Delete { id, yes } => delete::run(session, id, yes).await,
        Commands::Day { date } => day::run(session, date.as_deref()).await,
        Commands::Month { year, month, ics } => month::run(session, year, month, ics).await,
        Commands::Search { query } => search::run(session, &query).await,
        Commands::Share { id, ics } => share::run(session, id, ics).await,
        Commands::Shell => anyhow::bail!("Already in a shell"),
    }
}
