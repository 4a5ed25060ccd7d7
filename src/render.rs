//! Terminal rendering for agenda types.
//!
//! Extension traits and helpers that add colored output to agenda-core
//! types using owo_colors.

use agenda_core::{Color, Event};
use chrono::{Datelike, NaiveDate};
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Color {
    /// A dot in the event's own color, or a plain one for non-hex tags.
    fn render(&self) -> String {
        match self.rgb() {
            Some((r, g, b)) => "●".truecolor(r, g, b).to_string(),
            None => "●".to_string(),
        }
    }
}

impl Render for Event {
    /// One-line form used in lists.
    fn render(&self) -> String {
        let id = format!("#{}", self.id);
        format!(
            "  {} {:>8}  {} {}",
            self.color.render(),
            self.time,
            self.title,
            id.dimmed()
        )
    }
}

/// Full detail view of one event.
pub fn render_detail(event: &Event, today: NaiveDate) -> Vec<String> {
    let mut lines = vec![
        format!("{} {}", event.color.render(), event.title.bold()),
        format!("   {}  {}", "Date".dimmed(), date_label(event.date, today)),
        format!("   {}  {}", "Time".dimmed(), or_dash(&event.time)),
        format!("   {}  {}", "Note".dimmed(), or_dash(&event.description)),
    ];

    if let Some(created) = event.created_at {
        lines.push(format!(
            "   {}  {}",
            "Added".dimmed(),
            created.format("%Y-%m-%d %H:%M UTC")
        ));
    }
    if let Some(updated) = event.updated_at {
        lines.push(format!(
            "   {}  {}",
            "Edited".dimmed(),
            updated.format("%Y-%m-%d %H:%M UTC")
        ));
    }

    lines.push(format!("   {}", format!("#{}", event.id).dimmed()));
    lines
}

fn or_dash(text: &str) -> &str {
    if text.is_empty() { "-" } else { text }
}

/// Format a date as a human-readable label (e.g. "Today", "Tomorrow", "Wed Feb 25")
pub fn date_label(date: NaiveDate, today: NaiveDate) -> String {
    match (date - today).num_days() {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        _ if date.year() == today.year() => date.format("%a %b %-d").to_string(),
        _ => date.format("%a %b %-d %Y").to_string(),
    }
}

/// Events grouped under a bold date heading. Expects date-sorted input.
pub fn render_grouped(events: &[Event], today: NaiveDate) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current: Option<NaiveDate> = None;

    for event in events {
        if current != Some(event.date) {
            if current.is_some() {
                lines.push(String::new());
            }
            lines.push(date_label(event.date, today).bold().to_string());
            current = Some(event.date);
        }
        lines.push(event.render());
    }

    lines
}

pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}

/// Day numbers laid out in Monday-first weeks; `None` pads the edges.
fn month_cells(year: i32, month: u32) -> Option<Vec<[Option<u32>; 7]>> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    let days = u32::try_from((next - first).num_days()).ok()?;
    let offset = first.weekday().num_days_from_monday() as usize;

    let mut weeks = Vec::new();
    let mut week = [None; 7];
    let mut slot = offset;

    for day in 1..=days {
        week[slot] = Some(day);
        slot += 1;
        if slot == 7 {
            weeks.push(week);
            week = [None; 7];
            slot = 0;
        }
    }
    if slot > 0 {
        weeks.push(week);
    }

    Some(weeks)
}

/// Month grid with days that have events drawn in the first event's color
/// and today underlined.
pub fn render_month(year: i32, month: u32, events: &[Event], today: NaiveDate) -> Vec<String> {
    let Some(weeks) = month_cells(year, month) else {
        return Vec::new();
    };

    let title = NaiveDate::from_ymd_opt(year, month, 1)
        .map(|d| d.format("%B %Y").to_string())
        .unwrap_or_default();

    let mut lines = vec![
        format!("{:^20}", title).bold().to_string(),
        "Mo Tu We Th Fr Sa Su".dimmed().to_string(),
    ];

    for week in weeks {
        let cells: Vec<String> = week
            .iter()
            .map(|cell| match cell {
                None => "  ".to_string(),
                Some(day) => render_day(year, month, *day, events, today),
            })
            .collect();
        lines.push(cells.join(" "));
    }

    lines
}

fn render_day(year: i32, month: u32, day: u32, events: &[Event], today: NaiveDate) -> String {
    let text = format!("{:>2}", day);
    let date = NaiveDate::from_ymd_opt(year, month, day);
    let is_today = date == Some(today);
    let marked = events.iter().find(|e| Some(e.date) == date);

    match (marked.and_then(|e| e.color.rgb()), marked, is_today) {
        (Some((r, g, b)), _, true) => text.truecolor(r, g, b).bold().underline().to_string(),
        (Some((r, g, b)), _, false) => text.truecolor(r, g, b).bold().to_string(),
        (None, Some(_), true) => text.bold().underline().to_string(),
        (None, Some(_), false) => text.bold().to_string(),
        (None, None, true) => text.underline().to_string(),
        (None, None, false) => text,
    }
}
