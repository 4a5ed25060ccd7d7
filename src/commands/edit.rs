use agenda_core::{Color, EventId, EventPatch};
use anyhow::Result;
use owo_colors::OwoColorize;

use super::Session;
use crate::parse::parse_when;

pub struct EditArgs {
    pub title: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub description: Option<String>,
    pub color: Option<Color>,
}

pub async fn run(session: &Session<'_>, id: EventId, args: EditArgs) -> Result<()> {
    let patch = patch_from(args)?;
    let event = session
        .wait("Saving event", session.store.update(id, patch))
        .await?;

    if session.json {
        return session.print_json(&event);
    }

    let updated = format!("  Updated: {} (#{})", event.title, event.id);
    println!("{}", updated.yellow());
    Ok(())
}

fn patch_from(args: EditArgs) -> Result<EventPatch> {
    let title = match args.title {
        Some(title) if title.trim().is_empty() => anyhow::bail!("Title cannot be empty"),
        Some(title) => Some(title.trim().to_string()),
        None => None,
    };

    let (date, date_time) = match args.date.as_deref() {
        Some(input) => {
            let when = parse_when(input)?;
            (Some(when.date), when.time)
        }
        None => (None, None),
    };

    let patch = EventPatch {
        title,
        description: args.description.map(|d| d.trim().to_string()),
        date,
        time: args.time.or(date_time),
        color: args.color,
    };

    if patch.is_empty() {
        anyhow::bail!("Nothing to update. Pass --title, --date, --time, --description or --color");
    }

    Ok(patch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn args() -> EditArgs {
        EditArgs {
            title: None,
            date: None,
            time: None,
            description: None,
            color: None,
        }
    }

    #[test]
    fn only_given_flags_end_up_in_patch() {
        let patch = patch_from(EditArgs {
            title: Some(" X ".into()),
            ..args()
        })
        .unwrap();

        assert_eq!(patch.title.as_deref(), Some("X"));
        assert!(patch.date.is_none());
        assert!(patch.time.is_none());
        assert!(patch.description.is_none());
    }

    #[test]
    fn date_flag_parses_iso() {
        let patch = patch_from(EditArgs {
            date: Some("2025-12-24".into()),
            ..args()
        })
        .unwrap();
        assert_eq!(patch.date, NaiveDate::from_ymd_opt(2025, 12, 24));
    }

    #[test]
    fn empty_patch_is_rejected() {
        assert!(patch_from(args()).is_err());
    }

    #[test]
    fn blank_title_is_rejected() {
        assert!(
            patch_from(EditArgs {
                title: Some("   ".into()),
                ..args()
            })
            .is_err()
        );
    }

    #[test]
    fn description_may_be_cleared() {
        let patch = patch_from(EditArgs {
            description: Some(String::new()),
            ..args()
        })
        .unwrap();
        assert_eq!(patch.description.as_deref(), Some(""));
    }
}
