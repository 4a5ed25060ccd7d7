use agenda_core::EventId;
use anyhow::Result;

use super::Session;
use crate::parse::today;
use crate::render::render_detail;

pub async fn run(session: &Session<'_>, id: EventId) -> Result<()> {
    let event = session.wait("Loading event", session.store.get(id)).await?;

    if session.json {
        return session.print_json(&event);
    }

    for line in render_detail(&event, today()) {
        println!("{}", line);
    }

    Ok(())
}
