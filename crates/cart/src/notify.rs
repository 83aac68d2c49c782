//! User-facing notification sink.
//!
//! The cart surfaces every declined or failed operation as one of a small
//! set of fixed, human-readable messages. The sink is fire-and-forget; the
//! cart never waits on it and never learns whether anyone saw the message.

use parking_lot::Mutex;

/// The fixed user-facing message strings.
///
/// Two emission sites (the add and update stock gates) share the
/// out-of-stock wording.
pub mod messages {
    /// Requested quantity exceeds available stock (add and update).
    pub const OUT_OF_STOCK: &str = "Requested quantity exceeds available stock";
    /// Adding a product failed.
    pub const ADD_FAILED: &str = "Failed to add product";
    /// Removing a product failed.
    pub const REMOVE_FAILED: &str = "Failed to remove product";
    /// Changing a product quantity failed.
    pub const UPDATE_FAILED: &str = "Failed to update product quantity";
}

/// Fire-and-forget sink for user-facing messages.
pub trait Notifier: Send + Sync {
    /// Surface `message` to a human.
    fn notify(&self, message: &str);
}

/// Notifier that emits messages through `tracing` at `warn` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str) {
        tracing::warn!(target: "shopcart::notify", "{message}");
    }
}

/// Notifier that records every message, oldest first.
///
/// For tests and for embedders that render their own notifications.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages recorded so far.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages.lock().push(message.to_string());
    }
}
