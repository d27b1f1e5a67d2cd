//! Test utilities for verifying tracing output.
//!
//! `CaptureLayer` records span names and fields plus every event, so tests
//! can assert on the logging contract of the lookups.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::span::{Attributes, Id};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;

/// A recorded span with its name, level, and fields.
#[derive(Debug, Clone)]
pub struct CapturedSpan {
    pub name: &'static str,
    pub level: tracing::Level,
    pub fields: HashMap<String, String>,
}

/// A recorded event. The `message` field is kept separately.
#[derive(Debug, Clone)]
pub struct CapturedEvent {
    pub level: tracing::Level,
    pub message: String,
    pub fields: HashMap<String, String>,
    /// Innermost span the event was emitted in.
    pub span: Option<String>,
}

#[derive(Debug, Default)]
struct Captured {
    spans: Vec<CapturedSpan>,
    events: Vec<CapturedEvent>,
}

/// Shared storage for captured spans and events.
#[derive(Debug, Clone, Default)]
pub struct CaptureStore(Arc<Mutex<Captured>>);

impl CaptureStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spans(&self) -> Vec<CapturedSpan> {
        self.0.lock().unwrap().spans.clone()
    }

    pub fn events(&self) -> Vec<CapturedEvent> {
        self.0.lock().unwrap().events.clone()
    }

    /// Returns the first span with the given name, if any.
    pub fn find_span(&self, name: &str) -> Option<CapturedSpan> {
        self.0
            .lock()
            .unwrap()
            .spans
            .iter()
            .find(|s| s.name == name)
            .cloned()
    }

    /// Returns all events at `level`.
    pub fn events_at(&self, level: tracing::Level) -> Vec<CapturedEvent> {
        self.0
            .lock()
            .unwrap()
            .events
            .iter()
            .filter(|e| e.level == level)
            .cloned()
            .collect()
    }
}

/// A tracing `Layer` that copies spans and events into a `CaptureStore`.
pub struct CaptureLayer {
    store: CaptureStore,
}

impl CaptureLayer {
    pub fn new(store: CaptureStore) -> Self {
        Self { store }
    }
}

/// Visitor that records fields as string key-value pairs.
struct FieldVisitor(HashMap<String, String>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0
            .insert(field.name().to_string(), format!("{:?}", value));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_i64(&mut self, field: &tracing::field::Field, value: i64) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }
}

impl<S> Layer<S> for CaptureLayer
where
    S: Subscriber + for<'lookup> LookupSpan<'lookup>,
{
    fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
        let mut fields = FieldVisitor(HashMap::new());
        attrs.record(&mut fields);

        let span_ref = ctx.span(id).expect("span should exist");
        let meta = span_ref.metadata();

        self.store.0.lock().unwrap().spans.push(CapturedSpan {
            name: meta.name(),
            level: *meta.level(),
            fields: fields.0,
        });
    }

    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        let mut fields = FieldVisitor(HashMap::new());
        event.record(&mut fields);
        let message = fields.0.remove("message").unwrap_or_default();
        let span = ctx.event_span(event).map(|s| s.name().to_string());

        self.store.0.lock().unwrap().events.push(CapturedEvent {
            level: *event.metadata().level(),
            message,
            fields: fields.0,
            span,
        });
    }
}

/// Install a capturing subscriber for the current thread.
///
/// Hold the returned guard for the duration of the test; dropping it unsets
/// the subscriber.
pub fn init_test_tracing() -> (CaptureStore, tracing::subscriber::DefaultGuard) {
    let store = CaptureStore::new();
    let layer = CaptureLayer::new(store.clone());

    use tracing_subscriber::layer::SubscriberExt;
    let subscriber = tracing_subscriber::registry().with(layer);
    let guard = tracing::subscriber::set_default(subscriber);

    (store, guard)
}
