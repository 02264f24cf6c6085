//! wga-audit
//!
//! Caller-owned session context for operator activity:
//!
//! - [`ActivityLog`]: the in-memory log shown in the activity modal. Newest
//!   first, capped, gated on the `log_activity` option. Owned by the caller
//!   and passed explicitly — the engine crates stay stateless.
//! - [`AuditWriter`]: append-only JSON Lines trail with an optional hash
//!   chain, for runs that must be reviewable after the fact. Event ids are
//!   derived deterministically from chain state + payload + sequence; no
//!   RNG.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Most entries the in-memory log retains.
pub const ACTIVITY_LOG_CAP: usize = 50;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub ts_utc: DateTime<Utc>,
    pub message: String,
}

/// In-memory activity log. Recording is a no-op when disabled.
#[derive(Clone, Debug)]
pub struct ActivityLog {
    enabled: bool,
    entries: Vec<ActivityEntry>,
}

impl ActivityLog {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            entries: Vec::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Prepend an entry, dropping the oldest past the cap.
    pub fn record(&mut self, message: impl Into<String>) {
        if !self.enabled {
            return;
        }
        self.entries.insert(
            0,
            ActivityEntry {
                ts_utc: Utc::now(),
                message: message.into(),
            },
        );
        self.entries.truncate(ACTIVITY_LOG_CAP);
    }

    /// Entries, newest first.
    pub fn entries(&self) -> &[ActivityEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One audit trail event.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuditEvent {
    pub event_id: Uuid,
    pub session_id: Uuid,
    pub ts_utc: DateTime<Utc>,
    pub kind: String,
    pub payload: Value,
    pub hash_prev: Option<String>,
    pub hash_self: Option<String>,
}

/// Append-only audit writer. One JSON event per line; with `hash_chain` on,
/// each event links to the previous one so tampering is detectable.
pub struct AuditWriter {
    path: PathBuf,
    hash_chain: bool,
    last_hash: Option<String>,
    seq: u64,
}

impl AuditWriter {
    /// Create the writer and ensure parent directories exist.
    pub fn new(path: impl AsRef<Path>, hash_chain: bool) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| format!("create_dir_all {parent:?}"))?;
        }
        Ok(Self {
            path,
            hash_chain,
            last_hash: None,
            seq: 0,
        })
    }

    /// Restore chain state when resuming an existing trail: the last line's
    /// `hash_self` and the number of events already written.
    pub fn resume(&mut self, last_hash: Option<String>, seq: u64) {
        self.last_hash = last_hash;
        self.seq = seq;
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Append one event.
    pub fn append(&mut self, session_id: Uuid, kind: &str, payload: Value) -> Result<AuditEvent> {
        let event_id = derive_event_id(self.last_hash.as_deref(), &payload, self.seq)?;
        self.seq += 1;

        let mut event = AuditEvent {
            event_id,
            session_id,
            ts_utc: Utc::now(),
            kind: kind.to_string(),
            payload,
            hash_prev: None,
            hash_self: None,
        };

        if self.hash_chain {
            event.hash_prev = self.last_hash.clone();
            let hash = compute_event_hash(&event)?;
            event.hash_self = Some(hash.clone());
            self.last_hash = Some(hash);
        }

        let line = serde_json::to_string(&event).context("serialize audit event")?;
        append_line(&self.path, &line)?;
        Ok(event)
    }
}

fn append_line(path: &Path, line: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open audit trail {path:?}"))?;
    writeln!(file, "{line}").with_context(|| format!("append to audit trail {path:?}"))?;
    Ok(())
}

/// Deterministic event id: SHA-256 over chain state + canonical payload +
/// sequence, folded into a v5 UUID.
fn derive_event_id(last_hash: Option<&str>, payload: &Value, seq: u64) -> Result<Uuid> {
    let payload_json = serde_json::to_string(payload).context("serialize event payload")?;
    let mut hasher = Sha256::new();
    hasher.update(last_hash.unwrap_or("genesis").as_bytes());
    hasher.update(payload_json.as_bytes());
    hasher.update(seq.to_be_bytes());
    let digest = hasher.finalize();
    Ok(Uuid::new_v5(&Uuid::NAMESPACE_OID, &digest))
}

/// Hash of an event with `hash_self` cleared; struct field order makes the
/// serialization canonical.
fn compute_event_hash(event: &AuditEvent) -> Result<String> {
    let mut unhashed = event.clone();
    unhashed.hash_self = None;
    let json = serde_json::to_string(&unhashed).context("serialize audit event for hashing")?;
    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    Ok(hex::encode(hasher.finalize()))
}

/// Chain verification verdict.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChainStatus {
    Intact { events: usize },
    /// First line (1-based) whose hash or back-link does not hold.
    Tampered { line: usize },
}

impl ChainStatus {
    pub fn is_intact(&self) -> bool {
        matches!(self, ChainStatus::Intact { .. })
    }
}

/// Verify a hash-chained trail's text content.
pub fn verify_chain(content: &str) -> Result<ChainStatus> {
    let mut expected_prev: Option<String> = None;
    let mut events = 0usize;

    for (idx, raw) in content.lines().enumerate() {
        let line = idx + 1;
        if raw.trim().is_empty() {
            continue;
        }
        let event: AuditEvent = match serde_json::from_str(raw) {
            Ok(event) => event,
            Err(_) => return Ok(ChainStatus::Tampered { line }),
        };
        if event.hash_prev != expected_prev {
            return Ok(ChainStatus::Tampered { line });
        }
        let recomputed = compute_event_hash(&event)?;
        if event.hash_self.as_deref() != Some(recomputed.as_str()) {
            return Ok(ChainStatus::Tampered { line });
        }
        expected_prev = event.hash_self;
        events += 1;
    }

    Ok(ChainStatus::Intact { events })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activity_log_is_newest_first_and_capped() {
        let mut log = ActivityLog::new(true);
        for i in 0..(ACTIVITY_LOG_CAP + 10) {
            log.record(format!("entry {i}"));
        }
        assert_eq!(log.len(), ACTIVITY_LOG_CAP);
        assert_eq!(log.entries()[0].message, format!("entry {}", ACTIVITY_LOG_CAP + 9));
    }

    #[test]
    fn disabled_activity_log_records_nothing() {
        let mut log = ActivityLog::new(false);
        log.record("ignored");
        assert!(log.is_empty());
    }

    #[test]
    fn event_ids_are_deterministic_for_identical_chain_state() {
        let payload = serde_json::json!({"mode": "Add", "matched": 3});
        let a = derive_event_id(None, &payload, 0).unwrap();
        let b = derive_event_id(None, &payload, 0).unwrap();
        assert_eq!(a, b);
        let c = derive_event_id(None, &payload, 1).unwrap();
        assert_ne!(a, c);
    }
}
