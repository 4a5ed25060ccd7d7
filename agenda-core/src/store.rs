//! In-memory event store.
//!
//! `EventStore` owns every `Event` and is the only thing allowed to change
//! them. Each operation first waits out its simulated latency, then takes
//! the collection lock for a short synchronous critical section, so a call
//! either applies completely or not at all.

use std::sync::Arc;
use std::time::Duration;

use chrono::{Datelike, NaiveDate, Utc};
use tokio::sync::Mutex;

use crate::error::{AgendaError, AgendaResult};
use crate::event::{Acknowledgement, Color, Event, EventId, EventPatch, NewEvent};
use crate::latency::Latency;
use crate::probe::{OutboundCall, SideEffectHook};
use crate::seed;

struct Events {
    items: Vec<Event>,
    next_id: u64,
}

impl Events {
    fn position(&self, id: EventId) -> AgendaResult<usize> {
        self.items
            .iter()
            .position(|e| e.id == id)
            .ok_or(AgendaError::NotFound(id))
    }

    fn filtered(&self, keep: impl Fn(&Event) -> bool) -> Vec<Event> {
        self.items.iter().filter(|e| keep(e)).cloned().collect()
    }
}

pub struct EventStore {
    events: Mutex<Events>,
    latency: Latency,
    hook: Option<Arc<dyn SideEffectHook>>,
}

impl EventStore {
    /// A ready store holding the four seed events.
    pub fn new(latency: Latency) -> Self {
        let items = seed::seed_events();
        tracing::debug!(count = items.len(), "store seeded");
        Self::from_parts(items, seed::NEXT_ID_AFTER_SEED, latency)
    }

    /// A store with no events; ids start at 1.
    pub fn empty(latency: Latency) -> Self {
        Self::from_parts(Vec::new(), 1, latency)
    }

    fn from_parts(items: Vec<Event>, next_id: u64, latency: Latency) -> Self {
        EventStore {
            events: Mutex::new(Events { items, next_id }),
            latency,
            hook: None,
        }
    }

    /// Install the hook that receives a call for every applied mutation.
    pub fn with_hook(mut self, hook: Arc<dyn SideEffectHook>) -> Self {
        self.hook = Some(hook);
        self
    }

    pub fn latency(&self) -> Latency {
        self.latency
    }

    /// Number of live events. No simulated latency.
    pub async fn len(&self) -> usize {
        self.events.lock().await.items.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// All events, ascending by date. Events sharing a date keep their
    /// collection order.
    pub async fn list(&self) -> Vec<Event> {
        self.latency.wait_bulk().await;

        let mut events = self.events.lock().await.items.clone();
        events.sort_by_key(|e| e.date);

        tracing::debug!(count = events.len(), "GET /events");
        events
    }

    pub async fn get(&self, id: EventId) -> AgendaResult<Event> {
        self.latency.wait_point().await;

        let events = self.events.lock().await;
        let index = events.position(id)?;

        tracing::debug!(%id, "GET /events/:id");
        Ok(events.items[index].clone())
    }

    pub async fn create(&self, fields: NewEvent) -> AgendaResult<Event> {
        self.latency.wait_bulk().await;

        let mut events = self.events.lock().await;
        let id = EventId(events.next_id);
        events.next_id += 1;

        let event = Event {
            id,
            title: fields.title,
            description: fields.description,
            date: fields.date,
            time: fields.time,
            color: fields.color.unwrap_or_else(Color::random),
            created_at: Some(Utc::now()),
            updated_at: None,
        };
        events.items.push(event.clone());
        self.emit(OutboundCall::created(id));

        tracing::info!(%id, title = %event.title, "event created");
        Ok(event)
    }

    pub async fn update(&self, id: EventId, patch: EventPatch) -> AgendaResult<Event> {
        self.latency.wait_bulk().await;

        let mut events = self.events.lock().await;
        let index = events.position(id)?;

        let event = &mut events.items[index];
        patch.apply(event);
        event.updated_at = Some(Utc::now());
        let updated = event.clone();
        self.emit(OutboundCall::updated(id));

        tracing::info!(%id, title = %updated.title, "event updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: EventId) -> AgendaResult<Acknowledgement> {
        self.latency.wait_bulk().await;

        let mut events = self.events.lock().await;
        let index = events.position(id)?;

        let removed = events.items.remove(index);
        self.emit(OutboundCall::deleted(id));

        tracing::info!(%id, title = %removed.title, "event deleted");
        Ok(Acknowledgement::deleted())
    }

    pub async fn list_by_date(&self, date: NaiveDate) -> Vec<Event> {
        self.latency.wait_point().await;

        let events = self.events.lock().await.filtered(|e| e.date == date);
        tracing::debug!(%date, count = events.len(), "GET /events/date/:date");
        events
    }

    /// Events dated within `year`-`month`. `month` is 1-based.
    pub async fn list_by_month(&self, year: i32, month: u32) -> Vec<Event> {
        self.latency.wait_point().await;

        let events = self
            .events
            .lock()
            .await
            .filtered(|e| e.date.year() == year && e.date.month() == month);
        tracing::debug!(year, month, count = events.len(), "GET /events/month/:year/:month");
        events
    }

    /// Case-insensitive substring search over title and description.
    pub async fn search(&self, query: &str) -> Vec<Event> {
        self.latency.wait_point().await;

        let needle = query.to_lowercase();
        let events = self.events.lock().await.filtered(|e| e.matches(&needle));
        tracing::debug!(query, count = events.len(), "GET /events/search");
        events
    }

    /// Wait up to `limit` for side calls still in flight; returns how many
    /// were abandoned. Call before the runtime shuts down.
    pub async fn flush(&self, limit: Duration) -> usize {
        match &self.hook {
            Some(hook) => hook.flush(limit).await,
            None => 0,
        }
    }

    fn emit(&self, call: OutboundCall) {
        if let Some(hook) = &self.hook {
            hook.notify(call);
        }
    }
}
