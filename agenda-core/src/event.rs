//! Calendar event types.
//!
//! `Event` is the record owned by the store. Callers never build one
//! directly: they hand a `NewEvent` to `EventStore::create` and an
//! `EventPatch` to `EventStore::update`.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use crate::error::{AgendaError, AgendaResult};

/// Store-assigned event identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub u64);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EventId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(EventId)
    }
}

impl From<u64> for EventId {
    fn from(id: u64) -> Self {
        EventId(id)
    }
}

/// Display color tag (hex, e.g. `#FF6B6B`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(String);

impl Color {
    /// Colors handed out to events created without one.
    pub const PALETTE: [&'static str; 5] = ["#FF6B6B", "#4ECDC4", "#45B7D1", "#FFA07A", "#98D8C8"];

    pub fn new(tag: impl Into<String>) -> Self {
        Color(tag.into())
    }

    /// Pick a palette color uniformly at random.
    pub fn random() -> Self {
        let tag = Self::PALETTE
            .choose(&mut rand::rng())
            .copied()
            .unwrap_or("#FF6B6B");
        Color::new(tag)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse a `#RRGGBB` tag into its components.
    /// Returns None for anything else, since the tag is free-form.
    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        let hex = self.0.strip_prefix('#')?;
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some((r, g, b))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single calendar entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    /// Display string such as "10:00 AM"; never parsed.
    pub time: String,
    pub color: Color,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Event {
    /// Case-insensitive substring match on title or description.
    /// `needle` must already be lowercase.
    pub(crate) fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// Fields supplied when creating an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEvent {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub time: String,
    /// Left unset to get a random palette color.
    #[serde(default)]
    pub color: Option<Color>,
}

impl NewEvent {
    pub fn new(title: impl Into<String>, date: NaiveDate, time: impl Into<String>) -> Self {
        NewEvent {
            title: title.into(),
            description: String::new(),
            date,
            time: time.into(),
            color: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Trim text fields and reject an empty title.
    ///
    /// This is the form-level check front-ends run before `create`.
    pub fn validate(mut self) -> AgendaResult<Self> {
        self.title = self.title.trim().to_string();
        self.description = self.description.trim().to_string();

        if self.title.is_empty() {
            return Err(AgendaError::Validation("title is required".into()));
        }

        Ok(self)
    }
}

/// Partial update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

impl EventPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.date.is_none()
            && self.time.is_none()
            && self.color.is_none()
    }

    pub(crate) fn apply(self, event: &mut Event) {
        if let Some(title) = self.title {
            event.title = title;
        }
        if let Some(description) = self.description {
            event.description = description;
        }
        if let Some(date) = self.date {
            event.date = date;
        }
        if let Some(time) = self.time {
            event.time = time;
        }
        if let Some(color) = self.color {
            event.color = color;
        }
    }
}

/// Returned by a successful delete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Acknowledgement {
    pub success: bool,
    pub message: String,
}

impl Acknowledgement {
    pub fn deleted() -> Self {
        Acknowledgement {
            success: true,
            message: "Event deleted".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn make_test_event() -> Event {
        Event {
            id: EventId(7),
            title: "Standup".into(),
            description: "Daily sync".into(),
            date: date(2025, 3, 20),
            time: "9:30 AM".into(),
            color: Color::new("#4ECDC4"),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn validate_trims_fields() {
        let fields = NewEvent::new("  Lunch  ", date(2025, 1, 1), "1:00 PM")
            .with_description("  with team ");
        let fields = fields.validate().unwrap();
        assert_eq!(fields.title, "Lunch");
        assert_eq!(fields.description, "with team");
    }

    #[test]
    fn validate_rejects_blank_title() {
        let err = NewEvent::new("   ", date(2025, 1, 1), "").validate().unwrap_err();
        assert!(matches!(err, AgendaError::Validation(_)));
    }

    #[test]
    fn random_color_comes_from_palette() {
        for _ in 0..50 {
            let color = Color::random();
            assert!(Color::PALETTE.contains(&color.as_str()));
        }
    }

    #[test]
    fn color_rgb_parses_hex() {
        assert_eq!(Color::new("#FF6B6B").rgb(), Some((0xFF, 0x6B, 0x6B)));
        assert_eq!(Color::new("red").rgb(), None);
        assert_eq!(Color::new("#FFF").rgb(), None);
    }

    #[test]
    fn patch_only_touches_supplied_fields() {
        let mut event = make_test_event();
        let patch = EventPatch {
            title: Some("Retro".into()),
            ..Default::default()
        };
        patch.apply(&mut event);

        assert_eq!(event.title, "Retro");
        assert_eq!(event.description, "Daily sync");
        assert_eq!(event.time, "9:30 AM");
        assert_eq!(event.date, date(2025, 3, 20));
    }

    #[test]
    fn empty_patch_is_empty() {
        assert!(EventPatch::default().is_empty());
        let patch = EventPatch {
            time: Some("noon".into()),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }

    #[test]
    fn event_serializes_camel_case_with_iso_date() {
        let mut event = make_test_event();
        event.created_at = Some(Utc::now());
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["id"], 7);
        assert_eq!(json["date"], "2025-03-20");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_none());
    }

    #[test]
    fn matches_is_case_insensitive_on_both_fields() {
        let event = make_test_event();
        assert!(event.matches("stand"));
        assert!(event.matches("sync"));
        assert!(!event.matches("lunch"));
    }

    #[test]
    fn event_id_parses_from_str() {
        assert_eq!(" 42 ".parse::<EventId>().unwrap(), EventId(42));
        assert!("abc".parse::<EventId>().is_err());
    }
}
