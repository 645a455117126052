// SPDX-License-Identifier: GPL-3.0-only

//! Toast queue.
//!
//! Toasts are shown one at a time at the bottom of the window. Further
//! toasts wait in a FIFO queue until the current one times out or is
//! dismissed.

use std::collections::VecDeque;
use std::time::Instant;

use crate::app_settings::TOAST_DURATION_MS;

/// Severity level for toast notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastSeverity {
    Info,
    Warning,
    Error,
}

/// A toast notification message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    /// Severity level affecting visual styling
    pub severity: ToastSeverity,
}

impl Toast {
    pub fn new(message: impl Into<String>, severity: ToastSeverity) -> Self {
        Self {
            message: message.into(),
            severity,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, ToastSeverity::Info)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, ToastSeverity::Warning)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, ToastSeverity::Error)
    }
}

/// The displayed toast plus the ones waiting.
#[derive(Debug, Clone, Default)]
pub struct ToastQueue {
    current: Option<(Toast, Instant)>,
    queue: VecDeque<Toast>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a toast. Shown immediately when nothing else is on screen.
    pub fn push(&mut self, toast: Toast) {
        self.queue.push_back(toast);
        if self.current.is_none() {
            self.show_next();
        }
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(Toast::info(message));
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(Toast::warning(message));
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(Toast::error(message));
    }

    /// Pops the next toast from the queue onto the screen.
    pub fn show_next(&mut self) {
        if let Some(toast) = self.queue.pop_front() {
            self.current = Some((toast, Instant::now()));
        }
    }

    /// Dismisses the current toast and shows the next one, if any.
    pub fn dismiss(&mut self) {
        self.current = None;
        self.show_next();
    }

    pub fn current(&self) -> Option<&Toast> {
        self.current.as_ref().map(|(toast, _)| toast)
    }

    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    fn is_expired(&self) -> bool {
        self.current
            .as_ref()
            .is_some_and(|(_, shown)| shown.elapsed().as_millis() as u64 >= TOAST_DURATION_MS)
    }

    /// Timer tick. Returns `true` if the current toast timed out.
    pub fn tick(&mut self) -> bool {
        if self.is_expired() {
            self.dismiss();
            true
        } else {
            false
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_first_toast_shows_immediately() {
        let mut toasts = ToastQueue::new();
        assert!(!toasts.is_active());

        toasts.info("Tekst spremljen");
        assert_eq!(toasts.current(), Some(&Toast::info("Tekst spremljen")));
        assert_eq!(toasts.pending(), 0);
    }

    #[test]
    fn test_toasts_queue_in_order() {
        let mut toasts = ToastQueue::new();
        toasts.info("prvi");
        toasts.warning("drugi");
        toasts.error("treći");
        assert_eq!(toasts.pending(), 2);

        toasts.dismiss();
        assert_eq!(toasts.current().map(|t| t.severity), Some(ToastSeverity::Warning));
        toasts.dismiss();
        assert_eq!(toasts.current().map(|t| t.message.as_str()), Some("treći"));
        toasts.dismiss();
        assert!(!toasts.is_active());
    }

    #[test]
    fn test_tick_before_timeout_keeps_toast() {
        let mut toasts = ToastQueue::new();
        toasts.info("poruka");
        assert!(!toasts.tick());
        assert!(toasts.is_active());
    }

    #[test]
    fn test_tick_after_timeout_advances() {
        let mut toasts = ToastQueue::new();
        toasts.info("stara");
        toasts.info("nova");

        let shown = Instant::now() - Duration::from_millis(TOAST_DURATION_MS + 1);
        if let Some((_, at)) = toasts.current.as_mut() {
            *at = shown;
        }

        assert!(toasts.tick());
        assert_eq!(toasts.current().map(|t| t.message.as_str()), Some("nova"));
    }

    #[test]
    fn test_tick_without_toast_is_noop() {
        let mut toasts = ToastQueue::new();
        assert!(!toasts.tick());
    }
}
