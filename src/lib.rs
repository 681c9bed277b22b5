//! Credvault: core of a personal credential vault.
//!
//! Generates passwords, scores their strength, and keeps the user's
//! credential records in local storage with plain-JSON backup export/import.
//! The stored blob is obfuscated, not encrypted.

pub mod app;
pub mod database;
pub mod logging;
pub mod managers;
pub mod platform;
pub mod rpc_handler;
pub mod services;
pub mod types;
