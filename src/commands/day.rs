use anyhow::Result;
use owo_colors::OwoColorize;

use super::Session;
use crate::parse::{parse_date, today};
use crate::render::date_label;

pub async fn run(session: &Session<'_>, date: Option<&str>) -> Result<()> {
    let today = today();
    let date = match date {
        Some(input) => parse_date(input)?,
        None => today,
    };

    let events = session
        .wait("Loading events", session.store.list_by_date(date))
        .await;

    if !session.json {
        println!(
            "{} {}",
            date_label(date, today).bold(),
            date.format("%A, %B %-d %Y").to_string().dimmed()
        );
    }

    session.print_events(&events, "No events on this day")
}
