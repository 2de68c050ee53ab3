//! Proposals raised by the bots (or by hand) that wait for a human decision.

use crate::error::{McError, Result};
use crate::paths;
use crate::store::{require_text, JsonStore, Record};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProposalStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ProposalStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ProposalStatus::Pending => "pending",
            ProposalStatus::Approved => "approved",
            ProposalStatus::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Proposal {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Which automation raised it, e.g. `trader` or `social`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default)]
    pub status: ProposalStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decided_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decision_note: Option<String>,
}

impl Record for Proposal {
    const KIND: &'static str = "proposal";
    const ID_PREFIX: char = 'P';

    fn id(&self) -> &str {
        &self.id
    }
}

pub fn store(root: &Path) -> JsonStore<Proposal> {
    JsonStore::open(paths::data_file(root, paths::PROPOSALS_FILE))
}

pub fn add(
    root: &Path,
    title: &str,
    description: impl Into<String>,
    source: Option<String>,
) -> Result<Proposal> {
    let title = require_text("title", title)?;
    let description = description.into();
    store(root).insert_with(|id| Proposal {
        id,
        title,
        description,
        source,
        status: ProposalStatus::Pending,
        created_at: Utc::now(),
        decided_at: None,
        decision_note: None,
    })
}

pub fn list(root: &Path) -> Result<Vec<Proposal>> {
    store(root).list()
}

/// Approve or reject a pending proposal. A decided proposal cannot be
/// decided again.
pub fn decide(
    root: &Path,
    id: &str,
    decision: ProposalStatus,
    note: Option<String>,
) -> Result<Proposal> {
    if decision == ProposalStatus::Pending {
        return Err(McError::InvalidStatus("pending".to_string()));
    }
    store(root).update(id, |p| {
        if p.status != ProposalStatus::Pending {
            return Err(McError::Conflict(format!(
                "proposal {} is already {}",
                p.id, p.status
            )));
        }
        p.status = decision;
        p.decided_at = Some(Utc::now());
        p.decision_note = note.filter(|n| !n.trim().is_empty());
        Ok(())
    })
}

pub fn pending_count(proposals: &[Proposal]) -> usize {
    proposals
        .iter()
        .filter(|p| p.status == ProposalStatus::Pending)
        .count()
}
