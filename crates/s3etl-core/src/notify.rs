//! User-facing notifications.

use std::sync::{Arc, Mutex};

/// Delivers a short message to the user (the alert of a page, a line on a console).
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

impl<N: Notifier + ?Sized> Notifier for Arc<N> {
    fn notify(&self, message: &str) {
        (**self).notify(message)
    }
}

/// Keeps every notification so callers can assert on them.
#[derive(Debug, Default, Clone)]
pub struct RecordingNotifier {
    messages: Arc<Mutex<Vec<String>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notifications received so far, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|m| m.clone())
            .unwrap_or_default()
    }

    pub fn count(&self) -> usize {
        self.messages.lock().map(|m| m.len()).unwrap_or(0)
    }

    pub fn last(&self) -> Option<String> {
        self.messages.lock().ok().and_then(|m| m.last().cloned())
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_notifier_shares_state_between_clones() {
        let notifier = RecordingNotifier::new();
        let clone = notifier.clone();

        clone.notify("Configuration saved");
        notifier.notify("Configuration cleared");

        assert_eq!(
            notifier.messages(),
            vec!["Configuration saved", "Configuration cleared"]
        );
        assert_eq!(clone.count(), 2);
        assert_eq!(clone.last().as_deref(), Some("Configuration cleared"));
    }
}
