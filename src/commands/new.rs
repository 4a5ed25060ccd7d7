use agenda_core::{Color, NewEvent};
use anyhow::Result;
use dialoguer::Input;
use owo_colors::OwoColorize;

use super::Session;
use crate::parse::{When, now_display_time, parse_when, today};

pub struct NewArgs {
    pub title: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub description: Option<String>,
    pub color: Option<Color>,
}

pub async fn run(session: &Session<'_>, args: NewArgs) -> Result<()> {
    let interactive = args.title.is_none() && !session.json;

    let fields = if interactive {
        prompt_fields(args)?
    } else {
        fields_from(
            args.title.unwrap_or_default(),
            args.date.as_deref(),
            args.time,
            args.description,
            args.color,
        )?
    };

    let fields = fields.validate()?;
    let event = session.wait("Saving event", session.store.create(fields)).await?;

    if session.json {
        return session.print_json(&event);
    }

    if interactive {
        println!();
    }
    let created = format!("  Created: {} (#{})", event.title, event.id);
    println!("{}", created.green());

    Ok(())
}

/// Build the create payload from flags. The date defaults to today and the
/// time to one named in the date input, else the current time.
fn fields_from(
    title: String,
    date: Option<&str>,
    time: Option<String>,
    description: Option<String>,
    color: Option<Color>,
) -> Result<NewEvent> {
    let when = match date {
        Some(input) => parse_when(input)?,
        None => When {
            date: today(),
            time: None,
        },
    };

    let time = time.or(when.time).unwrap_or_else(now_display_time);
    let mut fields = NewEvent::new(title, when.date, time)
        .with_description(description.unwrap_or_default());
    fields.color = color;

    Ok(fields)
}

fn prompt_fields(args: NewArgs) -> Result<NewEvent> {
    let title = loop {
        let input: String = Input::new().with_prompt("  Title").interact_text()?;
        if !input.trim().is_empty() {
            break input;
        }
        eprintln!("  {}", "Title is required".red());
    };

    let when = match args.date {
        Some(input) => parse_when(&input)?,
        None => prompt_when()?,
    };

    let time = match args.time.or(when.time) {
        Some(time) => time,
        None => {
            let now = now_display_time();
            Input::new()
                .with_prompt("  Time?")
                .default(now)
                .interact_text()?
        }
    };

    let description = match args.description {
        Some(description) => description,
        None => Input::new()
            .with_prompt("  Description (skip)")
            .default(String::new())
            .show_default(false)
            .interact_text()?,
    };

    let mut fields = NewEvent::new(title, when.date, time).with_description(description);
    fields.color = args.color;
    Ok(fields)
}

/// Prompt for the date with retry on parse errors. Empty means today.
fn prompt_when() -> Result<When> {
    loop {
        let input: String = Input::new()
            .with_prompt("  When? (today)")
            .default(String::new())
            .show_default(false)
            .interact_text()?;
        if input.trim().is_empty() {
            return Ok(When {
                date: today(),
                time: None,
            });
        }
        match parse_when(&input) {
            Ok(when) => return Ok(when),
            Err(e) => eprintln!("  {}", e.to_string().red()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn flags_become_fields() {
        let fields = fields_from(
            "Dentist".into(),
            Some("2025-12-03"),
            Some("4:30 PM".into()),
            Some("bring x-rays".into()),
            Some(Color::new("#98D8C8")),
        )
        .unwrap();

        assert_eq!(fields.title, "Dentist");
        assert_eq!(fields.date, NaiveDate::from_ymd_opt(2025, 12, 3).unwrap());
        assert_eq!(fields.time, "4:30 PM");
        assert_eq!(fields.description, "bring x-rays");
        assert_eq!(fields.color, Some(Color::new("#98D8C8")));
    }

    #[test]
    fn time_comes_from_date_input_when_not_given() {
        let fields = fields_from("Call".into(), Some("tomorrow 3pm"), None, None, None).unwrap();
        assert_eq!(fields.time, "3:00 PM");
        assert_eq!(fields.date, today().succ_opt().unwrap());
    }

    #[test]
    fn missing_date_means_today() {
        let fields = fields_from("Now".into(), None, Some("noon".into()), None, None).unwrap();
        assert_eq!(fields.date, today());
        assert_eq!(fields.time, "noon");
        assert!(fields.color.is_none());
    }

    #[test]
    fn blank_title_fails_validation() {
        let fields = fields_from("  ".into(), Some("2025-12-03"), None, None, None).unwrap();
        assert!(fields.validate().is_err());
    }

    #[test]
    fn bad_date_is_an_error() {
        assert!(fields_from("x".into(), Some("someday maybe xyz"), None, None, None).is_err());
    }
}
