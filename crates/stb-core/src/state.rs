use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Local};

/// Process-lifetime bot state, created once in `main` and threaded through
/// handlers via `Arc` (no hidden singleton).
///
/// `alerts` is an ordered, append-only list. The runtime wires no producer
/// for it yet; `record_alert` is the seam one would use.
pub struct BotState {
    started_at: DateTime<Local>,
    alerts: Mutex<Vec<String>>,
}

impl BotState {
    pub fn new() -> Self {
        Self::started(Local::now())
    }

    /// Construct with an explicit start time (tests pin this).
    pub fn started(started_at: DateTime<Local>) -> Self {
        Self {
            started_at,
            alerts: Mutex::new(Vec::new()),
        }
    }

    pub fn started_at(&self) -> DateTime<Local> {
        self.started_at
    }

    /// Append one alert line.
    pub fn record_alert(&self, line: impl Into<String>) {
        self.lock().push(line.into());
    }

    pub fn alert_count(&self) -> usize {
        self.lock().len()
    }

    /// The most recent `limit` alerts, oldest first.
    pub fn recent_alerts(&self, limit: usize) -> Vec<String> {
        let alerts = self.lock();
        let skip = alerts.len().saturating_sub(limit);
        alerts[skip..].to_vec()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        match self.alerts.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Default for BotState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let state = BotState::new();
        assert_eq!(state.alert_count(), 0);
        assert!(state.recent_alerts(10).is_empty());
    }

    #[test]
    fn records_in_insertion_order() {
        let state = BotState::new();
        state.record_alert("first");
        state.record_alert("second");
        assert_eq!(state.alert_count(), 2);
        assert_eq!(state.recent_alerts(10), vec!["first", "second"]);
    }

    #[test]
    fn recent_alerts_keeps_the_tail() {
        let state = BotState::new();
        for i in 0..5 {
            state.record_alert(format!("alert-{i}"));
        }
        assert_eq!(state.recent_alerts(2), vec!["alert-3", "alert-4"]);
        assert_eq!(state.recent_alerts(99).len(), 5);
    }
}
