use thiserror::Error;

// === GeneratorError ===

/// Errors raised while synthesizing a password.
///
/// An options set with no active character class is not an error: the
/// generator returns an empty string for it.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// The system random source could not produce bytes.
    #[error("Random generation failed: {0}")]
    RandomSource(String),
}

// === StorageError ===

/// Errors reported by a key-value persistence backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The underlying SQLite database rejected an operation.
    #[error("Database error: {0}")]
    Database(String),
    /// The backend lock was poisoned by a panicking writer.
    #[error("Storage backend unavailable: {0}")]
    Unavailable(String),
}

impl From<rusqlite::Error> for StorageError {
    fn from(e: rusqlite::Error) -> Self {
        StorageError::Database(e.to_string())
    }
}

// === StoreError ===

/// Errors raised by the record store when writing or exporting.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The persistence backend failed.
    #[error("Storage failed: {0}")]
    Storage(#[from] StorageError),
    /// The collection could not be serialized.
    #[error("Serialization failed: {0}")]
    Serialization(String),
    /// Reading or writing an export file failed.
    #[error("IO error: {0}")]
    Io(String),
}

// === ImportError ===

/// Errors raised while importing user-supplied backup text.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The text is not a JSON array of record objects.
    #[error("Malformed import data: {0}")]
    Malformed(String),
    /// An entry lacks a required field or has it empty.
    #[error("Entry {index} is missing required field '{field}'")]
    MissingField { index: usize, field: &'static str },
    /// The backup file could not be read.
    #[error("IO error: {0}")]
    Io(String),
}

// === VaultError ===

/// Errors raised by vault mutations.
#[derive(Debug, Error)]
pub enum VaultError {
    /// A record failed the required-field rule.
    #[error("Validation failed: {0}")]
    Validation(String),
    /// No record with the given id exists.
    #[error("Entry not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Import(#[from] ImportError),
}

// === SettingsError ===

/// Errors related to the settings engine.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// File system I/O error.
    #[error("Settings I/O error: {0}")]
    IoError(String),
    /// JSON serialization or deserialization error.
    #[error("Settings serialization error: {0}")]
    SerializationError(String),
    /// The specified settings key is invalid or unknown.
    #[error("Invalid settings key: {0}")]
    InvalidKey(String),
    /// The value for a known key is out of range or of the wrong type.
    #[error("Invalid settings value: {0}")]
    InvalidValue(String),
}

// === AppError ===

/// Errors raised while bootstrapping the application core.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
