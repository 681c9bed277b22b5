//! Credvault persistence layer.
//!
//! Provides SQLite connection management, schema migrations and the
//! key-value surface the record store writes its blob into.
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use credvault::database::{Database, KeyValueStore, SqliteKeyValueStore};
//!
//! let db = Arc::new(Database::open("vault.db").expect("failed to open database"));
//! let kv = SqliteKeyValueStore::new(db);
//! kv.set("greeting", "hello").expect("write failed");
//! ```

pub mod connection;
pub mod key_value;
pub mod migrations;

pub use connection::Database;
pub use key_value::{KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore};
