use agenda_core::EventId;
use anyhow::Result;
use dialoguer::Confirm;
use owo_colors::OwoColorize;

use super::Session;

pub async fn run(session: &Session<'_>, id: EventId, yes: bool) -> Result<()> {
    if !yes {
        if session.json {
            anyhow::bail!("Pass --yes to delete without a prompt");
        }

        let event = session.wait("Loading event", session.store.get(id)).await?;
        let confirmed = Confirm::new()
            .with_prompt(format!("  Delete \"{}\"?", event.title))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "  Cancelled".dimmed());
            return Ok(());
        }
    }

    let ack = session
        .wait("Deleting event", session.store.delete(id))
        .await?;

    if session.json {
        return session.print_json(&ack);
    }

    println!("{}", format!("  {} (#{})", ack.message, id).red());
    Ok(())
}
