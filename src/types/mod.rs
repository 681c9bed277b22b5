// Credvault shared type definitions
// Each submodule defines types used across the crate.

pub mod errors;
pub mod generator;
pub mod record;
pub mod settings;
