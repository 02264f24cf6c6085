pub mod compare;
pub mod policy;

use anyhow::{Context, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;
use uuid::Uuid;
use wga_audit::{ActivityLog, AuditWriter};
use wga_config::Options;

/// Caller-owned session context threaded through every command: options,
/// the in-memory activity log, and the optional on-disk audit trail.
pub struct Session {
    pub options: Options,
    pub activity: ActivityLog,
    trail: Option<AuditWriter>,
    session_id: Uuid,
}

impl Session {
    pub fn new(options: Options, trail_path: Option<&Path>) -> Result<Self> {
        let trail = trail_path
            .map(|path| AuditWriter::new(path, true))
            .transpose()?;
        Ok(Self {
            options,
            activity: ActivityLog::new(options.log_activity),
            trail,
            session_id: Uuid::new_v4(),
        })
    }

    /// Record one completed run: activity log entry plus audit event.
    pub fn log(&mut self, kind: &str, message: String, payload: Value) -> Result<()> {
        tracing::info!("{message}");
        self.activity.record(message);
        if let Some(trail) = &mut self.trail {
            trail.append(self.session_id, kind, payload)?;
        }
        Ok(())
    }
}

pub fn read_input(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("read code list {path:?}"))
}
