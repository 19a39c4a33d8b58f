//! Events published by bars, and the post-drag click guard.

use std::time::{Duration, Instant};

use chrono::NaiveDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub enum ChartEvent {
    /// A gesture moved or resized a bar. `end` is inclusive (exclusive end
    /// minus one second).
    DateChange {
        task_id: Uuid,
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
    Click {
        task_id: Uuid,
    },
}

impl ChartEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ChartEvent::DateChange { .. } => "date_change",
            ChartEvent::Click { .. } => "click",
        }
    }
}

/// Receiver of chart events.
pub trait EventSink {
    fn trigger_event(&mut self, event: ChartEvent);
}

impl EventSink for Vec<ChartEvent> {
    fn trigger_event(&mut self, event: ChartEvent) {
        self.push(event);
    }
}

/// Suppresses click/popup activation for a short window after a drag
/// ends, so the release is not read as a click.
#[derive(Debug, Clone)]
pub struct ActionGuard {
    window: Duration,
    completed_at: Option<Instant>,
}

impl ActionGuard {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            completed_at: None,
        }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    pub fn mark_completed(&mut self, now: Instant) {
        self.completed_at = Some(now);
    }

    pub fn suppresses(&self, now: Instant) -> bool {
        self.completed_at
            .is_some_and(|t| now.saturating_duration_since(t) < self.window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_is_open_until_an_action_completes() {
        let guard = ActionGuard::from_millis(1000);
        assert!(!guard.suppresses(Instant::now()));
    }

    #[test]
    fn guard_window_expires() {
        let mut guard = ActionGuard::from_millis(1000);
        let t0 = Instant::now();
        guard.mark_completed(t0);
        assert!(guard.suppresses(t0));
        assert!(guard.suppresses(t0 + Duration::from_millis(999)));
        assert!(!guard.suppresses(t0 + Duration::from_millis(1000)));
    }

    #[test]
    fn vec_collects_events() {
        let mut sink: Vec<ChartEvent> = Vec::new();
        let task_id = Uuid::new_v4();
        sink.trigger_event(ChartEvent::Click { task_id });
        assert_eq!(sink.len(), 1);
        assert_eq!(sink[0].name(), "click");
    }
}
