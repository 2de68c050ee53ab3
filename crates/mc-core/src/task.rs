use crate::error::{McError, Result};
use crate::paths;
use crate::store::{require_text, JsonStore, Record};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Done => "done",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = McError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "todo" => Ok(TaskStatus::Todo),
            "in_progress" => Ok(TaskStatus::InProgress),
            "done" => Ok(TaskStatus::Done),
            other => Err(McError::InvalidStatus(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record for Task {
    const KIND: &'static str = "task";
    const ID_PREFIX: char = 'T';

    fn id(&self) -> &str {
        &self.id
    }
}

/// Partial update; `None` fields are left alone.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub project: Option<String>,
}

pub fn store(root: &Path) -> JsonStore<Task> {
    JsonStore::open(paths::data_file(root, paths::TASKS_FILE))
}

pub fn add(root: &Path, title: &str, project: Option<String>) -> Result<Task> {
    let title = require_text("title", title)?;
    let now = Utc::now();
    store(root).insert_with(|id| Task {
        id,
        title,
        description: None,
        status: TaskStatus::Todo,
        project,
        created_at: now,
        updated_at: now,
    })
}

pub fn list(root: &Path) -> Result<Vec<Task>> {
    store(root).list()
}

pub fn update(root: &Path, id: &str, patch: TaskPatch) -> Result<Task> {
    store(root).update(id, |task| {
        if let Some(title) = patch.title {
            task.title = require_text("title", &title)?;
        }
        if let Some(description) = patch.description {
            task.description = Some(description).filter(|d| !d.trim().is_empty());
        }
        if let Some(project) = patch.project {
            task.project = Some(project).filter(|p| !p.trim().is_empty());
        }
        if let Some(status) = patch.status {
            task.status = status;
        }
        task.updated_at = Utc::now();
        Ok(())
    })
}

pub fn set_status(root: &Path, id: &str, status: TaskStatus) -> Result<Task> {
    update(
        root,
        id,
        TaskPatch {
            status: Some(status),
            ..Default::default()
        },
    )
}

pub fn delete(root: &Path, id: &str) -> Result<bool> {
    store(root).delete(id)
}

/// Human-readable summary: "2/5 done, 1 in progress"
pub fn summarize(tasks: &[Task]) -> String {
    let total = tasks.len();
    let done = tasks.iter().filter(|t| t.status == TaskStatus::Done).count();
    let in_progress = tasks
        .iter()
        .filter(|t| t.status == TaskStatus::InProgress)
        .count();
    format!("{done}/{total} done, {in_progress} in progress")
}

pub fn open_count(tasks: &[Task]) -> usize {
    tasks.iter().filter(|t| t.status != TaskStatus::Done).count()
}
