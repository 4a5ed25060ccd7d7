use agenda_core::EventId;
use agenda_core::ics::{generate_ics, share_text};
use anyhow::Result;

use super::Session;

pub async fn run(session: &Session<'_>, id: EventId, ics: bool) -> Result<()> {
    let event = session.wait("Loading event", session.store.get(id)).await?;

    let output = if ics {
        generate_ics(&event)
    } else {
        share_text(&event)
    };

    if session.json {
        return session.print_json(&serde_json::json!({ "id": event.id, "share": output }));
    }

    print!("{}", output);
    if !output.ends_with('\n') {
        println!();
    }
    Ok(())
}
