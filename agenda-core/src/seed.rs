//! Sample events a fresh store starts with.

use chrono::NaiveDate;

use crate::event::{Color, Event, EventId};

/// First id handed out by `create` on a seeded store.
pub const NEXT_ID_AFTER_SEED: u64 = 5;

const SEED: [(&str, &str, (i32, u32, u32), &str, &str); 4] = [
    (
        "Reunión con cliente",
        "Presentación del proyecto nuevo",
        (2025, 11, 26),
        "10:00 AM",
        "#FF6B6B",
    ),
    (
        "Presentación proyecto",
        "Demo para stakeholders",
        (2025, 11, 27),
        "3:00 PM",
        "#4ECDC4",
    ),
    (
        "Cita médica",
        "Chequeo general anual",
        (2025, 11, 28),
        "9:00 AM",
        "#45B7D1",
    ),
    (
        "Llamada con equipo",
        "Revisión semanal",
        (2025, 11, 28),
        "2:00 PM",
        "#FFA07A",
    ),
];

/// The four seed events, ids 1 through 4.
pub fn seed_events() -> Vec<Event> {
    SEED.iter()
        .zip(1..)
        .filter_map(|(&(title, description, (y, m, d), time, color), id)| {
            Some(Event {
                id: EventId(id),
                title: title.to_string(),
                description: description.to_string(),
                date: NaiveDate::from_ymd_opt(y, m, d)?,
                time: time.to_string(),
                color: Color::new(color),
                created_at: None,
                updated_at: None,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_has_four_sequential_ids() {
        let events = seed_events();
        let ids: Vec<u64> = events.iter().map(|e| e.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_eq!(NEXT_ID_AFTER_SEED, ids.len() as u64 + 1);
    }

    #[test]
    fn seed_events_are_all_in_november_2025() {
        for event in seed_events() {
            assert_eq!(event.date.format("%Y-%m").to_string(), "2025-11");
            assert!(event.created_at.is_none());
        }
    }
}
