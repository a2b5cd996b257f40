//! In-memory writer for tests
//!
//! Every writer derived from a [`Recorder`] through [`Writer::with`] appends
//! to the same entry list, so a test can hold the root and assert on what any
//! scoped logger emitted.

use crate::core::{Caller, FieldValue, LogEntry, LogLevel, Result, Writer};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Default)]
struct Shared {
    entries: Mutex<Vec<LogEntry>>,
    sync_called: AtomicBool,
}

/// Records every entry emitted through it or any writer derived from it.
///
/// Cloning a recorder yields another handle on the same scope and the same
/// entry list.
///
/// # Example
///
/// ```
/// use logger_facade::prelude::*;
///
/// let recorder = Recorder::new();
/// let logger = Logger::from_writer(Config::default(), recorder.clone());
///
/// logger.with(&["user".into(), "bob".into()]).info(&["signed in".into()]);
///
/// let entries = recorder.entries();
/// assert_eq!(entries.len(), 1);
/// assert_eq!(entries[0].fields, vec![FieldValue::from("user"), FieldValue::from("bob")]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    fields: Vec<FieldValue>,
    shared: Arc<Shared>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fields bound on this scope.
    pub fn fields(&self) -> &[FieldValue] {
        &self.fields
    }

    /// Entries recorded across the whole chain, in emission order.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.shared.entries.lock().clone()
    }

    /// Whether `sync` was called on any writer in the chain.
    pub fn sync_called(&self) -> bool {
        self.shared.sync_called.load(Ordering::SeqCst)
    }

    /// Render every entry as `[level  ] message {fields}\n`.
    pub fn dump(&self) -> Vec<u8> {
        let entries = self.shared.entries.lock();
        let mut out = Vec::with_capacity(entries.len() * 32);
        for entry in entries.iter() {
            out.extend_from_slice(entry.to_string().as_bytes());
            out.push(b'\n');
        }
        out
    }

    fn record(&self, entry: LogEntry) {
        self.shared.entries.lock().push(entry.with_fields(&self.fields));
    }
}

impl Writer for Recorder {
    fn with(&self, fields: &[FieldValue]) -> Arc<dyn Writer> {
        let mut all = Vec::with_capacity(self.fields.len() + fields.len());
        all.extend_from_slice(&self.fields);
        all.extend_from_slice(fields);
        Arc::new(Recorder {
            fields: all,
            shared: Arc::clone(&self.shared),
        })
    }

    fn log(&self, level: LogLevel, _caller: Caller, args: &[FieldValue]) {
        self.record(LogEntry::new(level, args));
    }

    fn logf(&self, level: LogLevel, _caller: Caller, template: &str, args: &[FieldValue]) {
        self.record(LogEntry::formatted(level, template, args));
    }

    fn sync(&self) -> Result<()> {
        self.shared.sync_called.store(true, Ordering::SeqCst);
        Ok(())
    }
}
