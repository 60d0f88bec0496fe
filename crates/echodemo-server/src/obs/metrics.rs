//! Counter/gauge families with dynamic labels.
//!
//! Labels are flattened into sorted key vectors so the same label set always
//! maps to the same series regardless of call-site ordering.

use dashmap::DashMap;
use std::fmt::Write;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};

use echodemo_core::protocol::frame::MessageKind;

type LabelKey = Vec<(String, String)>;

fn label_key(labels: &[(&str, &str)]) -> LabelKey {
    let mut key: LabelKey = labels
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    key.sort();
    key
}

fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

/// `name{k="v",...}` or bare `name` when there are no labels.
fn series(name: &str, key: &LabelKey) -> String {
    if key.is_empty() {
        return name.to_string();
    }
    let labels = key
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
        .collect::<Vec<_>>()
        .join(",");
    format!("{name}{{{labels}}}")
}

#[derive(Default)]
pub struct CounterVec {
    map: DashMap<LabelKey, AtomicU64>,
}

impl CounterVec {
    pub fn inc(&self, labels: &[(&str, &str)]) {
        self.add(labels, 1);
    }

    pub fn add(&self, labels: &[(&str, &str)], v: u64) {
        let c = self
            .map
            .entry(label_key(labels))
            .or_insert_with(|| AtomicU64::new(0));
        c.fetch_add(v, Ordering::Relaxed);
    }

    /// Current value of one series (0 if never touched).
    pub fn get(&self, labels: &[(&str, &str)]) -> u64 {
        self.map
            .get(&label_key(labels))
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    fn render(&self, name: &str, help: &str, out: &mut String) {
        let _ = writeln!(out, "# HELP {name} {help}");
        let _ = writeln!(out, "# TYPE {name} counter");
        for r in self.map.iter() {
            let value = r.value().load(Ordering::Relaxed);
            let _ = writeln!(out, "{} {value}", series(name, r.key()));
        }
    }
}

#[derive(Default)]
pub struct GaugeVec {
    map: DashMap<LabelKey, AtomicI64>,
}

impl GaugeVec {
    pub fn inc(&self, labels: &[(&str, &str)]) {
        self.add(labels, 1);
    }

    pub fn dec(&self, labels: &[(&str, &str)]) {
        self.add(labels, -1);
    }

    pub fn add(&self, labels: &[(&str, &str)], v: i64) {
        let g = self
            .map
            .entry(label_key(labels))
            .or_insert_with(|| AtomicI64::new(0));
        g.fetch_add(v, Ordering::Relaxed);
    }

    pub fn get(&self, labels: &[(&str, &str)]) -> i64 {
        self.map
            .get(&label_key(labels))
            .map(|g| g.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    fn render(&self, name: &str, help: &str, out: &mut String) {
        let _ = writeln!(out, "# HELP {name} {help}");
        let _ = writeln!(out, "# TYPE {name} gauge");
        for r in self.map.iter() {
            let value = r.value().load(Ordering::Relaxed);
            let _ = writeln!(out, "{} {value}", series(name, r.key()));
        }
    }
}

#[derive(Default)]
pub struct ServerMetrics {
    pub ws_upgrades: CounterVec,
    pub ws_upgrade_failures: CounterVec,
    pub ws_sessions_active: GaugeVec,
    pub ws_echoed_messages: CounterVec,
    pub ws_echoed_bytes: CounterVec,
    pub ws_session_closes: CounterVec,
}

impl ServerMetrics {
    pub fn record_echo(&self, kind: MessageKind, len: usize) {
        let labels = [("kind", kind.as_str())];
        self.ws_echoed_messages.inc(&labels);
        self.ws_echoed_bytes.add(&labels, len as u64);
    }

    pub fn active_sessions(&self) -> i64 {
        self.ws_sessions_active.get(&[])
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.ws_upgrades
            .render("echodemo_ws_upgrades_total", "Successful WebSocket upgrades.", &mut out);
        self.ws_upgrade_failures.render(
            "echodemo_ws_upgrade_failures_total",
            "Refused or failed WebSocket upgrades.",
            &mut out,
        );
        self.ws_sessions_active
            .render("echodemo_ws_sessions_active", "Open echo sessions.", &mut out);
        self.ws_echoed_messages
            .render("echodemo_ws_echoed_messages_total", "Messages echoed back.", &mut out);
        self.ws_echoed_bytes
            .render("echodemo_ws_echoed_bytes_total", "Payload bytes echoed back.", &mut out);
        self.ws_session_closes
            .render("echodemo_ws_session_closes_total", "Ended sessions by reason.", &mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_order_does_not_split_series() {
        let c = CounterVec::default();
        c.inc(&[("a", "1"), ("b", "2")]);
        c.inc(&[("b", "2"), ("a", "1")]);
        assert_eq!(c.get(&[("a", "1"), ("b", "2")]), 2);
    }

    #[test]
    fn render_includes_labelled_and_bare_series() {
        let m = ServerMetrics::default();
        m.ws_sessions_active.inc(&[]);
        m.record_echo(MessageKind::Text, 2);
        let out = m.render();
        assert!(out.contains("echodemo_ws_sessions_active 1"));
        assert!(out.contains("echodemo_ws_echoed_messages_total{kind=\"text\"} 1"));
        assert!(out.contains("echodemo_ws_echoed_bytes_total{kind=\"text\"} 2"));
    }
}
