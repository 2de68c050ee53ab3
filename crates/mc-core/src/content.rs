//! Content pipeline items: ideas and drafts on their way to being posted.

use crate::error::{McError, Result};
use crate::paths;
use crate::store::{require_text, JsonStore, Record};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentStatus {
    #[default]
    Idea,
    Draft,
    Scheduled,
    Posted,
}

impl ContentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ContentStatus::Idea => "idea",
            ContentStatus::Draft => "draft",
            ContentStatus::Scheduled => "scheduled",
            ContentStatus::Posted => "posted",
        }
    }
}

impl std::fmt::Display for ContentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ContentStatus {
    type Err = McError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "idea" => Ok(ContentStatus::Idea),
            "draft" => Ok(ContentStatus::Draft),
            "scheduled" => Ok(ContentStatus::Scheduled),
            "posted" => Ok(ContentStatus::Posted),
            other => Err(McError::InvalidStatus(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default = "default_platform")]
    pub platform: String,
    #[serde(default)]
    pub status: ContentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_for: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_platform() -> String {
    "x".to_string()
}

impl Record for ContentItem {
    const KIND: &'static str = "content item";
    const ID_PREFIX: char = 'C';

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewContent {
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub platform: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentPatch {
    pub title: Option<String>,
    pub body: Option<String>,
    pub platform: Option<String>,
    pub status: Option<ContentStatus>,
    pub scheduled_for: Option<DateTime<Utc>>,
}

pub fn store(root: &Path) -> JsonStore<ContentItem> {
    JsonStore::open(paths::data_file(root, paths::CONTENT_FILE))
}

pub fn add(root: &Path, new: NewContent) -> Result<ContentItem> {
    let title = require_text("title", &new.title)?;
    let platform = new
        .platform
        .map(|p| p.trim().to_ascii_lowercase())
        .filter(|p| !p.is_empty())
        .unwrap_or_else(default_platform);
    let now = Utc::now();
    store(root).insert_with(|id| ContentItem {
        id,
        title,
        body: new.body,
        platform,
        status: ContentStatus::Idea,
        scheduled_for: None,
        created_at: now,
        updated_at: now,
    })
}

pub fn list(root: &Path) -> Result<Vec<ContentItem>> {
    store(root).list()
}

/// Apply a patch. Moving to `scheduled` requires a `scheduled_for` instant,
/// either already on the item or in the patch.
pub fn update(root: &Path, id: &str, patch: ContentPatch) -> Result<ContentItem> {
    store(root).update(id, |item| {
        if let Some(title) = patch.title {
            item.title = require_text("title", &title)?;
        }
        if let Some(body) = patch.body {
            item.body = body;
        }
        if let Some(platform) = patch.platform {
            item.platform = require_text("platform", &platform)?.to_ascii_lowercase();
        }
        if let Some(at) = patch.scheduled_for {
            item.scheduled_for = Some(at);
        }
        if let Some(status) = patch.status {
            if status == ContentStatus::Scheduled && item.scheduled_for.is_none() {
                return Err(McError::InvalidInput(
                    "scheduled_for is required to schedule an item".to_string(),
                ));
            }
            item.status = status;
        }
        item.updated_at = Utc::now();
        Ok(())
    })
}

pub fn delete(root: &Path, id: &str) -> Result<bool> {
    store(root).delete(id)
}

/// Count of items per status, in pipeline order.
pub fn pipeline_counts(items: &[ContentItem]) -> Vec<(ContentStatus, usize)> {
    [
        ContentStatus::Idea,
        ContentStatus::Draft,
        ContentStatus::Scheduled,
        ContentStatus::Posted,
    ]
    .into_iter()
    .map(|s| (s, items.iter().filter(|i| i.status == s).count()))
    .collect()
}
