//! Best-effort outbound calls made on every store mutation.
//!
//! The store hands each applied mutation to a `SideEffectHook`. What the
//! hook does with it (and whether it succeeds) never feeds back into the
//! store's result. `HttpProbe` forwards the call to a public test API so
//! network connectivity is exercised; no hook means no side calls at all.
//! Callers `flush` the hook before the runtime goes away so calls started by
//! a short-lived process still reach the endpoint.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinSet;

use crate::error::{AgendaError, AgendaResult};
use crate::event::EventId;

pub const DEFAULT_PROBE_URL: &str = "https://jsonplaceholder.typicode.com";

const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Description of the outbound request a mutation triggers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundCall {
    pub method: Method,
    pub path: String,
    pub event_id: EventId,
}

impl OutboundCall {
    pub fn created(id: EventId) -> Self {
        OutboundCall {
            method: Method::Post,
            path: "/posts".into(),
            event_id: id,
        }
    }

    pub fn updated(id: EventId) -> Self {
        OutboundCall {
            method: Method::Put,
            path: format!("/posts/{}", id),
            event_id: id,
        }
    }

    pub fn deleted(id: EventId) -> Self {
        OutboundCall {
            method: Method::Delete,
            path: format!("/posts/{}", id),
            event_id: id,
        }
    }
}

/// Receives applied mutations.
///
/// `notify` runs inside the store's critical section, so implementations
/// must return immediately and do any real work elsewhere.
pub trait SideEffectHook: Send + Sync {
    fn notify(&self, call: OutboundCall);

    /// Wait up to `limit` for calls still in flight and return how many
    /// were abandoned. Hooks that finish inside `notify` have nothing to wait for.
    fn flush(&self, _limit: Duration) -> Pin<Box<dyn Future<Output = usize> + Send + '_>> {
        Box::pin(std::future::ready(0))
    }
}

/// Sends each call to an HTTP test endpoint on a background task.
///
/// Tasks are kept in a `JoinSet` so the process can `flush` them before
/// the runtime shuts down. Clones share the same set.
#[derive(Clone)]
pub struct HttpProbe {
    client: reqwest::Client,
    base_url: String,
    in_flight: Arc<Mutex<JoinSet<()>>>,
}

impl HttpProbe {
    pub fn new(base_url: impl Into<String>) -> AgendaResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(PROBE_TIMEOUT)
            .build()
            .map_err(|e| AgendaError::Config(format!("Could not build HTTP client: {e}")))?;

        Ok(HttpProbe {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            in_flight: Arc::new(Mutex::new(JoinSet::new())),
        })
    }

    /// Calls spawned and not yet reaped.
    pub fn pending(&self) -> usize {
        self.tasks().len()
    }

    fn tasks(&self) -> MutexGuard<'_, JoinSet<()>> {
        // The set is only touched synchronously; a poisoned lock still holds a usable set.
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, call: &OutboundCall) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, call.path);
        let body = serde_json::json!({ "title": "test" });

        match call.method {
            Method::Post => self.client.post(url).json(&body),
            Method::Put => self.client.put(url).json(&body),
            Method::Delete => self.client.delete(url),
        }
    }
}

impl SideEffectHook for HttpProbe {
    fn notify(&self, call: OutboundCall) {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            tracing::warn!(method = %call.method, path = %call.path, "no async runtime, side call skipped");
            return;
        };

        let request = self.request(&call);
        let task = async move {
            match request.send().await {
                Ok(response) => tracing::info!(
                    method = %call.method,
                    path = %call.path,
                    status = response.status().as_u16(),
                    "side call completed"
                ),
                Err(e) => tracing::warn!(
                    method = %call.method,
                    path = %call.path,
                    error = %e,
                    "side call failed"
                ),
            }
        };

        let mut tasks = self.tasks();
        while tasks.try_join_next().is_some() {}
        tasks.spawn_on(task, &handle);
    }

    fn flush(&self, limit: Duration) -> Pin<Box<dyn Future<Output = usize> + Send + '_>> {
        let mut tasks = std::mem::take(&mut *self.tasks());

        Box::pin(async move {
            let drained = tokio::time::timeout(limit, async {
                while tasks.join_next().await.is_some() {}
            })
            .await;

            if drained.is_err() {
                tracing::warn!(
                    pending = tasks.len(),
                    ?limit,
                    "side calls still running, abandoning them"
                );
            }
            // Dropping the set aborts whatever is left.
            tasks.len()
        })
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::{Arc, Mutex};

    use super::{OutboundCall, SideEffectHook};

    /// Keeps every call it is handed.
    #[derive(Clone, Default)]
    pub struct RecordingHook {
        calls: Arc<Mutex<Vec<OutboundCall>>>,
    }

    impl RecordingHook {
        pub fn calls(&self) -> Vec<OutboundCall> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl SideEffectHook for RecordingHook {
        fn notify(&self, call: OutboundCall) {
            self.calls.lock().unwrap().push(call);
        }
    }
}
