//! Core types for agenda.
//!
//! This crate provides the pieces shared by every agenda front-end:
//! - `Event` and the field sets used to create and patch it
//! - `EventStore`, the in-memory owner of all events
//! - `probe` for the best-effort outbound call made on every mutation
//! - `config` for loading store settings from disk and the environment

pub mod config;
pub mod error;
pub mod event;
pub mod ics;
pub mod latency;
pub mod probe;
pub mod seed;
pub mod store;

pub use error::{AgendaError, AgendaResult};
pub use event::{Acknowledgement, Color, Event, EventId, EventPatch, NewEvent};
pub use latency::Latency;
pub use store::EventStore;
