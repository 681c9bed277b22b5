// Credvault state managers
// Managers own mutable state and persist it through the services.

pub mod vault_manager;
