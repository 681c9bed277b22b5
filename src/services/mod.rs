// Credvault services
// Stateless or storage-backed functionality: generation, obfuscation, record storage, settings.

pub mod obfuscation;
pub mod password_generator;
pub mod record_store;
pub mod settings_engine;
