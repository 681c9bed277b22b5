//! Record Store: persists the credential collection as one obfuscated blob
//! and handles plain-JSON backup export/import.
//!
//! The persisted blob is `obfuscation::encode(json(records))` under a single
//! storage key, overwritten in full on every save. Loading never fails on bad
//! data: a blob that does not decode is read as legacy plain JSON, and a blob
//! that does not parse either way yields an empty collection. Entries are
//! salvaged one at a time, so one odd entry never hides the rest.

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use log::{debug, info, warn};
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::database::KeyValueStore;
use crate::services::obfuscation;
use crate::types::errors::{ImportError, StoreError};
use crate::types::record::{CredentialRecord, DEFAULT_CATEGORY};

/// Trait defining record persistence operations.
pub trait RecordStoreTrait {
    /// Serializes and writes the whole collection, replacing any prior blob.
    fn save(&self, records: &[CredentialRecord]) -> Result<(), StoreError>;

    /// Reads the persisted collection. Missing or unreadable data yields an
    /// empty collection; only a backend failure is reported.
    fn load(&self) -> Result<Vec<CredentialRecord>, StoreError>;

    /// Pretty-printed JSON of the currently persisted collection.
    fn export(&self) -> Result<String, StoreError>;

    /// Parses backup text into records, repairing missing ids and timestamps.
    /// Does not persist anything.
    fn import(&self, text: &str) -> Result<Vec<CredentialRecord>, ImportError>;
}

pub struct RecordStore {
    backend: Arc<dyn KeyValueStore>,
    storage_key: String,
}

impl RecordStore {
    pub fn new(backend: Arc<dyn KeyValueStore>, storage_key: impl Into<String>) -> Self {
        Self {
            backend,
            storage_key: storage_key.into(),
        }
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// Writes the export to `path`.
    pub fn export_to_path(&self, path: &Path) -> Result<(), StoreError> {
        let text = self.export()?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| StoreError::Io(e.to_string()))?;
            }
        }
        fs::write(path, text).map_err(|e| StoreError::Io(e.to_string()))?;
        info!("exported vault to {}", path.display());
        Ok(())
    }

    /// Reads a backup file and parses it with [`RecordStoreTrait::import`].
    pub fn import_from_path(&self, path: &Path) -> Result<Vec<CredentialRecord>, ImportError> {
        let text = fs::read_to_string(path).map_err(|e| ImportError::Io(e.to_string()))?;
        self.import(&text)
    }
}

impl RecordStoreTrait for RecordStore {
    fn save(&self, records: &[CredentialRecord]) -> Result<(), StoreError> {
        let json =
            serde_json::to_string(records).map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.backend.set(&self.storage_key, &obfuscation::encode(&json))?;
        debug!("saved {} records under '{}'", records.len(), self.storage_key);
        Ok(())
    }

    fn load(&self) -> Result<Vec<CredentialRecord>, StoreError> {
        match self.backend.get(&self.storage_key)? {
            Some(stored) if !stored.trim().is_empty() => Ok(decode_blob(&stored, Utc::now())),
            _ => {
                debug!("no persisted records under '{}'", self.storage_key);
                Ok(Vec::new())
            }
        }
    }

    fn export(&self) -> Result<String, StoreError> {
        let records = self.load()?;
        serde_json::to_string_pretty(&records).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    fn import(&self, text: &str) -> Result<Vec<CredentialRecord>, ImportError> {
        parse_backup(text, Utc::now())
    }
}

fn decode_blob(stored: &str, now: DateTime<Utc>) -> Vec<CredentialRecord> {
    let entries = match obfuscation::decode(stored) {
        Ok(text) => entry_list(&text),
        Err(e) => {
            debug!("blob is not obfuscated: {}", e);
            None
        }
    };
    let entries = match entries {
        Some(entries) => entries,
        None => match entry_list(stored) {
            Some(entries) => {
                info!("reading records from a plain-text blob");
                entries
            }
            None => {
                warn!("persisted records are unreadable, starting empty");
                return Vec::new();
            }
        },
    };
    salvage(entries, now)
}

fn entry_list(text: &str) -> Option<Vec<Value>> {
    serde_json::from_str(text).ok()
}

/// Rebuilds stored entries leniently. Bad timestamps fall back to the other
/// timestamp or `now`; only entries that are not objects or carry no password
/// are dropped.
fn salvage(entries: Vec<Value>, now: DateTime<Utc>) -> Vec<CredentialRecord> {
    let mut seen = HashSet::with_capacity(entries.len());
    let mut records = Vec::with_capacity(entries.len());

    for (index, value) in entries.into_iter().enumerate() {
        let entry: BackupEntry = match serde_json::from_value(value) {
            Ok(entry) => entry,
            Err(e) => {
                warn!("dropping stored entry {}: {}", index, e);
                continue;
            }
        };
        let password = match entry.password.filter(|p| !p.is_empty()) {
            Some(password) => password,
            None => {
                warn!("dropping stored entry {}: no password", index);
                continue;
            }
        };

        let updated = lenient_timestamp(entry.updated_at);
        let created_at = lenient_timestamp(entry.created_at).or(updated).unwrap_or(now);
        records.push(CredentialRecord {
            id: assign_id(entry.id, &mut seen),
            title: entry.title.unwrap_or_default(),
            username: entry.username.unwrap_or_default(),
            password,
            website: entry.website,
            category: category_or_default(entry.category),
            notes: entry.notes,
            created_at,
            updated_at: updated.unwrap_or(created_at).max(created_at),
        });
    }
    records
}

fn lenient_timestamp(value: Option<String>) -> Option<DateTime<Utc>> {
    value
        .as_deref()
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
        .map(|t| t.with_timezone(&Utc))
}

/// Keeps `id` unless it is empty or already taken, else mints a UUID.
fn assign_id(id: Option<String>, seen: &mut HashSet<String>) -> String {
    let id = id
        .filter(|id| !id.is_empty() && !seen.contains(id))
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    seen.insert(id.clone());
    id
}

fn category_or_default(category: Option<String>) -> String {
    category
        .filter(|c| !c.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_CATEGORY.to_string())
}

/// Backup filename for an export taken on `date`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("passwords_backup_{}.json", date.format("%Y-%m-%d"))
}

/// One entry of a backup file, as loosely as older exports may write it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BackupEntry {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    password: Option<String>,
    #[serde(default)]
    website: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    notes: Option<String>,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    updated_at: Option<String>,
}

/// Parses backup text. Entries without an id (or repeating an earlier one)
/// get a fresh UUID; missing timestamps become `now`.
pub fn parse_backup(text: &str, now: DateTime<Utc>) -> Result<Vec<CredentialRecord>, ImportError> {
    let entries: Vec<BackupEntry> =
        serde_json::from_str(text).map_err(|e| ImportError::Malformed(e.to_string()))?;

    let mut seen = HashSet::with_capacity(entries.len());
    let mut repaired = 0usize;
    let mut records = Vec::with_capacity(entries.len());

    for (index, entry) in entries.into_iter().enumerate() {
        let title = required(entry.title, index, "title")?;
        let username = required(entry.username, index, "username")?;
        let password = required(entry.password, index, "password")?;

        if entry.id.as_deref().map_or(true, |id| id.is_empty() || seen.contains(id)) {
            repaired += 1;
        }
        let id = assign_id(entry.id, &mut seen);

        let created_at = timestamp(entry.created_at, index, "createdAt", now)?;
        let updated_at = timestamp(entry.updated_at, index, "updatedAt", now)?.max(created_at);

        records.push(CredentialRecord {
            id,
            title,
            username,
            password,
            website: entry.website,
            category: category_or_default(entry.category),
            notes: entry.notes,
            created_at,
            updated_at,
        });
    }

    if repaired > 0 {
        info!("assigned fresh ids to {} imported entries", repaired);
    }
    Ok(records)
}

fn required(value: Option<String>, index: usize, field: &'static str) -> Result<String, ImportError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or(ImportError::MissingField { index, field })
}

fn timestamp(
    value: Option<String>,
    index: usize,
    field: &str,
    now: DateTime<Utc>,
) -> Result<DateTime<Utc>, ImportError> {
    match value.as_deref() {
        None | Some("") => Ok(now),
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map(|t| t.with_timezone(&Utc))
            .map_err(|e| ImportError::Malformed(format!("entry {} has invalid {}: {}", index, field, e))),
    }
}
