//! Vault Manager.
//!
//! Owns the in-memory credential collection and is the only way to mutate it.
//! Every mutation builds the next collection, writes it through the
//! [`RecordStore`], and only then replaces the in-memory copy, so memory and
//! storage never disagree after a call returns.

use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use log::{debug, info};
use uuid::Uuid;

use crate::services::record_store::{export_file_name, RecordStore, RecordStoreTrait};
use crate::types::errors::{StoreError, VaultError};
use crate::types::record::{
    CredentialRecord, NewRecord, RecordFilter, RecordUpdate, SUGGESTED_CATEGORIES,
};

/// Trait defining vault collection operations.
pub trait VaultManagerTrait {
    fn entries(&self) -> &[CredentialRecord];
    fn get(&self, id: &str) -> Option<&CredentialRecord>;
    fn add_entry(&mut self, draft: NewRecord) -> Result<CredentialRecord, VaultError>;
    fn update_entry(&mut self, id: &str, update: RecordUpdate) -> Result<CredentialRecord, VaultError>;
    fn delete_entry(&mut self, id: &str) -> Result<(), VaultError>;
    fn clear_all(&mut self) -> Result<(), VaultError>;
    /// Replaces the whole collection. Returns the number of records kept.
    fn import_entries(&mut self, records: Vec<CredentialRecord>) -> Result<usize, VaultError>;
    fn import_text(&mut self, text: &str) -> Result<usize, VaultError>;
    fn export_text(&self) -> Result<String, VaultError>;
    fn search(&self, filter: &RecordFilter) -> Vec<&CredentialRecord>;
    /// Sorted, de-duplicated categories currently in use.
    fn categories(&self) -> Vec<String>;
}

pub struct VaultManager {
    store: RecordStore,
    entries: Vec<CredentialRecord>,
    default_category: String,
}

impl VaultManager {
    /// Loads the persisted collection and takes ownership of it.
    pub fn load(store: RecordStore, default_category: impl Into<String>) -> Result<Self, StoreError> {
        let entries = store.load()?;
        info!("vault loaded with {} entries", entries.len());
        Ok(Self {
            store,
            entries,
            default_category: default_category.into(),
        })
    }

    pub fn set_default_category(&mut self, category: impl Into<String>) {
        self.default_category = category.into();
    }

    pub fn default_category(&self) -> &str {
        &self.default_category
    }

    pub fn suggested_categories() -> &'static [&'static str] {
        &SUGGESTED_CATEGORIES
    }

    /// Writes an export file named after today's date into `dir`.
    pub fn export_backup(&self, dir: &Path) -> Result<PathBuf, VaultError> {
        let path = dir.join(export_file_name(Utc::now().date_naive()));
        self.store.export_to_path(&path)?;
        Ok(path)
    }

    fn commit(&mut self, next: Vec<CredentialRecord>) -> Result<(), VaultError> {
        self.store.save(&next)?;
        self.entries = next;
        Ok(())
    }

    fn category_or_default(&self, category: Option<String>) -> String {
        category
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| self.default_category.clone())
    }
}

fn require(value: String, field: &str) -> Result<String, VaultError> {
    if value.trim().is_empty() {
        return Err(VaultError::Validation(format!("{} is required", field)));
    }
    Ok(value)
}

fn optional(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Timestamp for a mutation; never earlier than the record's creation.
fn touched(created_at: DateTime<Utc>) -> DateTime<Utc> {
    Utc::now().max(created_at)
}

fn validate_collection(records: &[CredentialRecord]) -> Result<(), VaultError> {
    let mut ids = HashSet::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        for (field, value) in [
            ("title", &record.title),
            ("username", &record.username),
            ("password", &record.password),
        ] {
            if value.trim().is_empty() {
                return Err(VaultError::Validation(format!(
                    "entry {} is missing {}",
                    index, field
                )));
            }
        }
        if record.id.is_empty() || !ids.insert(record.id.as_str()) {
            return Err(VaultError::Validation(format!(
                "entry {} has an empty or duplicate id",
                index
            )));
        }
    }
    Ok(())
}

impl VaultManagerTrait for VaultManager {
    fn entries(&self) -> &[CredentialRecord] {
        &self.entries
    }

    fn get(&self, id: &str) -> Option<&CredentialRecord> {
        self.entries.iter().find(|e| e.id == id)
    }

    fn add_entry(&mut self, draft: NewRecord) -> Result<CredentialRecord, VaultError> {
        let now = Utc::now();
        let record = CredentialRecord {
            id: Uuid::new_v4().to_string(),
            title: require(draft.title, "title")?,
            username: require(draft.username, "username")?,
            password: require(draft.password, "password")?,
            website: optional(draft.website),
            category: self.category_or_default(draft.category),
            notes: optional(draft.notes),
            created_at: now,
            updated_at: now,
        };

        let mut next = self.entries.clone();
        next.push(record.clone());
        self.commit(next)?;
        debug!("added entry {}", record.id);
        Ok(record)
    }

    fn update_entry(&mut self, id: &str, update: RecordUpdate) -> Result<CredentialRecord, VaultError> {
        let index = self
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| VaultError::NotFound(id.to_string()))?;

        let mut record = self.entries[index].clone();
        if update.is_empty() {
            return Ok(record);
        }
        if let Some(title) = update.title {
            record.title = require(title, "title")?;
        }
        if let Some(username) = update.username {
            record.username = require(username, "username")?;
        }
        if let Some(password) = update.password {
            record.password = require(password, "password")?;
        }
        if update.website.is_some() {
            record.website = optional(update.website);
        }
        if update.category.is_some() {
            record.category = self.category_or_default(update.category);
        }
        if update.notes.is_some() {
            record.notes = optional(update.notes);
        }
        record.updated_at = touched(record.created_at);

        let mut next = self.entries.clone();
        next[index] = record.clone();
        self.commit(next)?;
        debug!("updated entry {}", id);
        Ok(record)
    }

    fn delete_entry(&mut self, id: &str) -> Result<(), VaultError> {
        if self.get(id).is_none() {
            return Err(VaultError::NotFound(id.to_string()));
        }
        let next = self.entries.iter().filter(|e| e.id != id).cloned().collect();
        self.commit(next)?;
        debug!("deleted entry {}", id);
        Ok(())
    }

    fn clear_all(&mut self) -> Result<(), VaultError> {
        self.commit(Vec::new())?;
        info!("vault cleared");
        Ok(())
    }

    fn import_entries(&mut self, records: Vec<CredentialRecord>) -> Result<usize, VaultError> {
        validate_collection(&records)?;
        let count = records.len();
        self.commit(records)?;
        info!("vault replaced by {} imported entries", count);
        Ok(count)
    }

    fn import_text(&mut self, text: &str) -> Result<usize, VaultError> {
        let records = self.store.import(text)?;
        self.import_entries(records)
    }

    fn export_text(&self) -> Result<String, VaultError> {
        Ok(self.store.export()?)
    }

    fn search(&self, filter: &RecordFilter) -> Vec<&CredentialRecord> {
        self.entries.iter().filter(|e| filter.matches(e)).collect()
    }

    fn categories(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|e| e.category.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
