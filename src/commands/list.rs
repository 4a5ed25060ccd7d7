use anyhow::Result;
use owo_colors::OwoColorize;

use super::Session;
use crate::parse::today;
use crate::render::{pluralize, render_grouped};

pub async fn run(session: &Session<'_>) -> Result<()> {
    let events = session.wait("Loading events", session.store.list()).await;

    if session.json {
        return session.print_json(&events);
    }

    let count = format!("({} {})", events.len(), pluralize("event", events.len()));
    println!("{} {}", "My events".bold(), count.dimmed());

    if events.is_empty() {
        println!("{}", "No events yet. Add one with `agenda new`".dimmed());
        return Ok(());
    }

    println!();
    for line in render_grouped(&events, today()) {
        println!("{}", line);
    }

    Ok(())
}
