//! Append-only journal of materialization actions.
//! Every filesystem action attempted, successful or not, becomes one
//! timestamped entry. The journal is owned by the caller; the
//! materializer only appends through the `Journal` trait.

use chrono::Local;

/// Capability for appending journal entries.
///
/// The materializer depends on this trait only, never on a concrete
/// sink, so callers decide where entries end up.
pub trait Journal {
    /// Appends one entry for the given message.
    fn emit(&mut self, message: &str);
}

/// In-memory journal producing `[HH:MM:SS] <message>` entries.
#[derive(Debug, Default)]
pub struct MaterializationLog {
    entries: Vec<String>,
}

impl MaterializationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// All entries appended so far, in order.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

impl Journal for MaterializationLog {
    fn emit(&mut self, message: &str) {
        let timestamp = Local::now().format("%H:%M:%S");
        self.entries.push(format!("[{}] {}", timestamp, message));
    }
}
