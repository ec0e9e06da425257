//! Caller-Owned Evaluation History
//!
//! The engine itself is stateless; front ends that want a scrollback of
//! successful evaluations own one of these. Append-only with a size cap,
//! plus JSON/CSV export for copy/share affordances.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// One successful evaluation, as displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub input: String,
    pub output: String,
    pub timestamp: DateTime<Utc>,
}

/// Append-only history with a fixed capacity; the oldest entry is dropped
/// when full.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<HistoryEntry>,
    capacity: usize,
}

impl History {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity,
        }
    }

    pub fn push(&mut self, input: &str, output: &str) {
        if self.entries.len() == self.capacity {
            self.entries.remove(0);
        }
        self.entries.push(HistoryEntry {
            input: input.to_string(),
            output: output.to_string(),
            timestamp: Utc::now(),
        });
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.entries)
    }

    pub fn to_csv(&self) -> String {
        let mut out = String::from("timestamp,input,output\n");
        for entry in &self.entries {
            out.push_str(&format!(
                "{},{},{}\n",
                entry.timestamp.to_rfc3339(),
                csv_field(&entry.input),
                csv_field(&entry.output)
            ));
        }
        out
    }
}

fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
