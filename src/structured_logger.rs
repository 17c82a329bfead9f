//! Structured JSONL logger for debugging and event reconstruction.
//!
//! This module provides machine-parseable logging with:
//! - Monotonic sequence numbers for ordering
//! - ISO 8601 timestamps with microsecond precision
//! - Session and run IDs for correlation
//! - Structured event data in JSON format

use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use crate::domain::{CampaignCommand, CampaignEvent};
use cqrs_es::DomainEvent;

/// Structured JSONL logger for debugging and event reconstruction.
pub struct StructuredLogger {
    session_id: String,
    run_id: AtomicU64,
    seq: AtomicU64,
    log_file: Mutex<File>,
    log_path: PathBuf,
}

/// A single log entry in JSONL format.
#[derive(Serialize, serde::Deserialize)]
pub struct LogEntry {
    /// Monotonic sequence number (unique across entire session)
    pub seq: u64,
    /// ISO 8601 timestamp with microseconds
    pub ts: String,
    /// Session ID
    pub session_id: String,
    /// Run ID (increments per CLI invocation within a session)
    pub run_id: u64,
    /// Component that emitted the log
    pub component: String,
    /// Structured event data
    pub event: Value,
}

impl StructuredLogger {
    /// Opens the structured log for the given session.
    ///
    /// Logs are written to `<logs_dir>/events.jsonl`. Each CLI invocation
    /// reopens the same file, so the run ID and sequence continue from the
    /// last entry already written.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The logs directory cannot be created
    /// - The log file cannot be opened
    pub fn new(session_id: &str, logs_dir: &Path) -> anyhow::Result<Self> {
        std::fs::create_dir_all(logs_dir)?;
        let log_path = logs_dir.join("events.jsonl");
        let (run_id, seq) = match last_entry(&log_path) {
            Some(entry) => (entry.run_id + 1, entry.seq),
            None => (1, 0),
        };
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        Ok(Self {
            session_id: session_id.to_string(),
            run_id: AtomicU64::new(run_id),
            seq: AtomicU64::new(seq),
            log_file: Mutex::new(file),
            log_path,
        })
    }

    pub fn run_id(&self) -> u64 {
        self.run_id.load(Ordering::SeqCst)
    }

    /// Returns the next sequence number.
    fn next_seq(&self) -> u64 {
        self.seq.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Logs a structured event.
    ///
    /// The event is serialized to JSON and written as a single line.
    /// This method is thread-safe.
    pub fn log(&self, component: &str, event: impl Serialize) {
        let entry = LogEntry {
            seq: self.next_seq(),
            ts: Utc::now().format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string(),
            session_id: self.session_id.clone(),
            run_id: self.run_id.load(Ordering::SeqCst),
            component: component.to_string(),
            event: serde_json::to_value(event).unwrap_or(Value::Null),
        };

        if let Ok(mut file) = self.log_file.lock() {
            if let Ok(line) = serde_json::to_string(&entry) {
                let _ = writeln!(file, "{}", line);
                let _ = file.flush();
            }
        }
    }

    /// Logs a campaign command before it is handed to the aggregate.
    pub fn log_campaign_command(&self, campaign_id: &str, command: &CampaignCommand) {
        self.log(
            "Campaign",
            serde_json::json!({
                "type": "CampaignCommand",
                "campaign_id": campaign_id,
                "command": command
            }),
        );
    }

    /// Logs a campaign event after it has been persisted.
    pub fn log_campaign_event(&self, campaign_id: &str, event: &CampaignEvent) {
        self.log(
            "Campaign",
            serde_json::json!({
                "type": "CampaignEvent",
                "campaign_id": campaign_id,
                "event_type": event.event_type(),
                "event": event
            }),
        );
    }

    /// Logs the outcome of a backend request.
    pub fn log_api_call(&self, method: &str, path: &str, outcome: &str) {
        self.log(
            "Api",
            serde_json::json!({
                "type": "Request",
                "method": method,
                "path": path,
                "outcome": outcome
            }),
        );
    }

    /// Logs a session lifecycle change (login, logout, expiry).
    pub fn log_session_change(&self, role: &str, change: &str) {
        self.log(
            "Session",
            serde_json::json!({
                "type": "SessionChange",
                "role": role,
                "change": change
            }),
        );
    }

    /// Returns the path to the log file.
    pub fn path(&self) -> &PathBuf {
        &self.log_path
    }

    /// Returns the current session ID.
    pub fn session_id(&self) -> &str {
        &self.session_id
    }
}

fn last_entry(path: &Path) -> Option<LogEntry> {
    let content = std::fs::read_to_string(path).ok()?;
    content
        .lines()
        .rev()
        .find(|line| !line.trim().is_empty())
        .and_then(|line| serde_json::from_str(line).ok())
}

#[cfg(test)]
#[path = "tests/structured_logger_tests.rs"]
mod tests;
