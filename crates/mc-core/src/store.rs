//! File-backed record collections.
//!
//! Each collection is one JSON array on disk. Every mutation is a full
//! load → modify → atomic rewrite; there is no in-memory copy shared between
//! callers.
//!
//! IDs are `<prefix><n>` with `n` one past the highest existing suffix, so a
//! delete never lets a later insert reuse a higher id.

use crate::error::{McError, Result};
use crate::io;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

pub trait Record: Serialize + DeserializeOwned + Clone {
    /// Human-readable kind used in not-found errors, e.g. `"task"`.
    const KIND: &'static str;
    const ID_PREFIX: char;

    fn id(&self) -> &str;
}

#[derive(Debug, Clone)]
pub struct JsonStore<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: Record> JsonStore<T> {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _marker: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All records in insertion order. A missing or blank file is empty.
    pub fn list(&self) -> Result<Vec<T>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    pub fn get(&self, id: &str) -> Result<T> {
        self.list()?
            .into_iter()
            .find(|r| r.id() == id)
            .ok_or_else(|| McError::not_found(T::KIND, id))
    }

    /// Allocate the next id, build the record with it and append it.
    pub fn insert_with(&self, build: impl FnOnce(String) -> T) -> Result<T> {
        let mut records = self.list()?;
        let record = build(next_id(T::ID_PREFIX, &records));
        records.push(record.clone());
        self.save_all(&records)?;
        Ok(record)
    }

    /// Apply `f` to the record with `id` and persist the result.
    pub fn update(&self, id: &str, f: impl FnOnce(&mut T) -> Result<()>) -> Result<T> {
        let mut records = self.list()?;
        let record = records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| McError::not_found(T::KIND, id))?;
        f(record)?;
        let updated = record.clone();
        self.save_all(&records)?;
        Ok(updated)
    }

    /// Returns `false` when no record had that id.
    pub fn delete(&self, id: &str) -> Result<bool> {
        let mut records = self.list()?;
        let before = records.len();
        records.retain(|r| r.id() != id);
        if records.len() == before {
            return Ok(false);
        }
        self.save_all(&records)?;
        Ok(true)
    }

    pub fn save_all(&self, records: &[T]) -> Result<()> {
        io::write_json(&self.path, records)
    }
}

pub fn next_id<T: Record>(prefix: char, records: &[T]) -> String {
    let max = records
        .iter()
        .filter_map(|r| r.id().strip_prefix(prefix)?.parse::<usize>().ok())
        .max()
        .unwrap_or(0);
    format!("{prefix}{}", max + 1)
}

/// Trim a user-supplied title, rejecting blanks.
pub fn require_text(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(McError::InvalidInput(format!("{field} must not be empty")));
    }
    Ok(trimmed.to_string())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
