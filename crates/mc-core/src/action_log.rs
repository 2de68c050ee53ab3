//! Append-only log of actions taken by the bots or by hand.

use crate::error::Result;
use crate::paths;
use crate::store::{require_text, JsonStore, Record};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionLogEntry {
    pub id: String,
    pub at: DateTime<Utc>,
    pub actor: String,
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl Record for ActionLogEntry {
    const KIND: &'static str = "action";
    const ID_PREFIX: char = 'A';

    fn id(&self) -> &str {
        &self.id
    }
}

pub fn store(root: &Path) -> JsonStore<ActionLogEntry> {
    JsonStore::open(paths::data_file(root, paths::ACTIONS_FILE))
}

pub fn append(
    root: &Path,
    actor: &str,
    action: &str,
    detail: Option<String>,
) -> Result<ActionLogEntry> {
    let actor = require_text("actor", actor)?;
    let action = require_text("action", action)?;
    store(root).insert_with(|id| ActionLogEntry {
        id,
        at: Utc::now(),
        actor,
        action,
        detail: detail.filter(|d| !d.trim().is_empty()),
    })
}

/// Newest first, at most `limit` entries.
pub fn recent(root: &Path, limit: usize) -> Result<Vec<ActionLogEntry>> {
    let mut entries = store(root).list()?;
    entries.reverse();
    entries.truncate(limit);
    Ok(entries)
}
