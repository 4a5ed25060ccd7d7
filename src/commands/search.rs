use anyhow::Result;
use owo_colors::OwoColorize;

use super::Session;
use crate::render::pluralize;

pub async fn run(session: &Session<'_>, query: &str) -> Result<()> {
    let events = session.wait("Searching", session.store.search(query)).await;

    if !session.json && !events.is_empty() {
        let header = format!(
            "{} {} for \"{}\"",
            events.len(),
            pluralize("result", events.len()),
            query
        );
        println!("{}", header.dimmed());
    }

    session.print_events(&events, &format!("Nothing matches \"{}\"", query))
}
