//! App core for Credvault.
//!
//! Holds the settings engine, the password generator and the vault manager,
//! wired to one SQLite database.

use std::path::Path;
use std::sync::Arc;

use log::info;

use crate::database::{Database, KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore};
use crate::logging;
use crate::managers::vault_manager::VaultManager;
use crate::services::password_generator::PasswordGenerator;
use crate::services::record_store::RecordStore;
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::types::errors::{AppError, StorageError};
use crate::types::settings::DEFAULT_STORAGE_KEY;

/// Database file name inside the data directory.
pub const DATABASE_FILE: &str = "credvault.db";

pub struct App {
    pub settings_engine: SettingsEngine,
    pub generator: PasswordGenerator,
    pub vault: VaultManager,
}

impl App {
    /// Opens settings from `config_path` (platform default when `None`) and the
    /// vault database inside `data_dir`, then loads the collection.
    pub fn new(data_dir: &Path, config_path: Option<String>) -> Result<Self, AppError> {
        let mut settings_engine = SettingsEngine::new(config_path);
        settings_engine.load()?;
        logging::init_logging(&settings_engine.get_settings().log_level);

        std::fs::create_dir_all(data_dir)
            .map_err(|e| StorageError::Database(format!("cannot create {}: {}", data_dir.display(), e)))?;
        let db_path = data_dir.join(DATABASE_FILE);
        let db = Arc::new(Database::open(&db_path).map_err(StorageError::from)?);
        info!("opened vault database at {}", db_path.display());

        Self::with_backend(settings_engine, Arc::new(SqliteKeyValueStore::new(db)))
    }

    /// Builds an app over an in-memory store with default settings kept at
    /// `config_path`. Nothing in the vault survives the process.
    pub fn ephemeral(config_path: String) -> Result<Self, AppError> {
        Self::with_backend(
            SettingsEngine::new(Some(config_path)),
            Arc::new(MemoryKeyValueStore::new()),
        )
    }

    pub fn with_backend(
        settings_engine: SettingsEngine,
        backend: Arc<dyn KeyValueStore>,
    ) -> Result<Self, AppError> {
        let settings = settings_engine.get_settings();
        let store = RecordStore::new(backend, DEFAULT_STORAGE_KEY);
        let vault = VaultManager::load(store, settings.default_category.clone())?;

        Ok(Self {
            settings_engine,
            generator: PasswordGenerator::new(),
            vault,
        })
    }

    /// Re-applies settings that the vault caches after a settings change.
    pub fn apply_settings(&mut self) {
        let category = self.settings_engine.get_settings().default_category.clone();
        self.vault.set_default_category(category);
    }
}
