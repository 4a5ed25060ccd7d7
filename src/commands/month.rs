use agenda_core::ics::generate_calendar;
use anyhow::Result;
use chrono::Datelike;

use super::Session;
use crate::parse::today;
use crate::render::{Render, render_month};

pub async fn run(
    session: &Session<'_>,
    year: Option<i32>,
    month: Option<u32>,
    ics: bool,
) -> Result<()> {
    let today = today();
    let year = year.unwrap_or(today.year());
    let month = month.unwrap_or(today.month());

    let mut events = session
        .wait("Loading calendar", session.store.list_by_month(year, month))
        .await;
    events.sort_by_key(|e| e.date);

    if ics {
        print!("{}", generate_calendar(&events));
        return Ok(());
    }
    if session.json {
        return session.print_json(&events);
    }

    for line in render_month(year, month, &events, today) {
        println!("{}", line);
    }
    println!();

    if events.is_empty() {
        println!("  No events this month");
        return Ok(());
    }

    let mut current = None;
    for event in &events {
        if current != Some(event.date) {
            println!("  {}", event.date.format("%a %-d"));
            current = Some(event.date);
        }
        println!("{}", event.render());
    }

    Ok(())
}
