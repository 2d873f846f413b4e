use crate::logging::{LogEvent, LogFields, LogLevel};
use serde_json::json;
use std::time::Duration;

/// Saturating counters accumulated across redraw passes.
#[derive(Debug, Default, Clone)]
pub struct RedrawMetrics {
    passes: u64,
    panes_rendered: u64,
    lines_emitted: u64,
    elastic_groups: u64,
}

impl RedrawMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_pass(&mut self, panes: usize, lines: usize) {
        self.passes = self.passes.saturating_add(1);
        self.panes_rendered = self.panes_rendered.saturating_add(panes as u64);
        self.lines_emitted = self.lines_emitted.saturating_add(lines as u64);
    }

    pub fn record_elastic_groups(&mut self, count: usize) {
        if count > 0 {
            self.elastic_groups = self.elastic_groups.saturating_add(count as u64);
        }
    }

    pub fn snapshot(&self, uptime: Duration) -> RedrawSnapshot {
        RedrawSnapshot {
            uptime_ms: uptime.as_millis() as u64,
            passes: self.passes,
            panes_rendered: self.panes_rendered,
            lines_emitted: self.lines_emitted,
            elastic_groups: self.elastic_groups,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RedrawSnapshot {
    pub uptime_ms: u64,
    pub passes: u64,
    pub panes_rendered: u64,
    pub lines_emitted: u64,
    pub elastic_groups: u64,
}

impl RedrawSnapshot {
    pub fn as_fields(&self) -> LogFields {
        let mut map = LogFields::new();
        map.insert("uptime_ms".to_string(), json!(self.uptime_ms));
        map.insert("passes".to_string(), json!(self.passes));
        map.insert("panes_rendered".to_string(), json!(self.panes_rendered));
        map.insert("lines_emitted".to_string(), json!(self.lines_emitted));
        map.insert("elastic_groups".to_string(), json!(self.elastic_groups));
        map
    }

    pub fn to_log_event(&self, target: &str) -> LogEvent {
        LogEvent::with_fields(LogLevel::Info, target, "redraw_metrics", self.as_fields())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate_across_passes() {
        let mut metrics = RedrawMetrics::new();
        metrics.record_pass(4, 120);
        metrics.record_pass(4, 118);
        metrics.record_elastic_groups(1);

        let snapshot = metrics.snapshot(Duration::from_millis(32));
        assert_eq!(snapshot.passes, 2);
        assert_eq!(snapshot.panes_rendered, 8);
        assert_eq!(snapshot.lines_emitted, 238);
        assert_eq!(snapshot.elastic_groups, 1);
    }

    #[test]
    fn snapshot_converts_to_a_log_event() {
        let metrics = RedrawMetrics::new();
        let event = metrics
            .snapshot(Duration::from_secs(1))
            .to_log_event("atrium::metrics");
        assert_eq!(event.fields.get("passes"), Some(&json!(0)));
    }
}
