//! RPC method handler for the vault's UI bridge.
//!
//! The presentation layer sends `(method, params)` pairs; `handle_method`
//! dispatches them to the generator, the vault manager and the settings
//! engine and returns plain JSON. Confirmation before destructive calls
//! (`vault.import`, `vault.clear`) is the caller's job.
//!
//! Key casing follows the data's home format. Records (`vault.*` params and
//! results) use the camelCase keys of the persisted blob and backup files,
//! e.g. `createdAt`. Generator options and settings use the snake_case keys
//! of `settings.json`, e.g. `exclude_similar`, so a `settings.set` path and a
//! `generator.generate` override name a field the same way.

use std::sync::Mutex;

use chrono::Utc;
use serde_json::{json, Value};

use crate::app::App;
use crate::managers::vault_manager::{VaultManager, VaultManagerTrait};
use crate::services::password_generator::{strength_score, PasswordGeneratorTrait};
use crate::services::record_store::export_file_name;
use crate::services::settings_engine::SettingsEngineTrait;
use crate::types::generator::GenerationOptions;
use crate::types::record::{NewRecord, RecordFilter, RecordUpdate};

fn str_param<'a>(params: &'a Value, name: &str) -> Result<&'a str, String> {
    params
        .get(name)
        .and_then(|v| v.as_str())
        .ok_or_else(|| format!("missing {}", name))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<Value, String> {
    serde_json::to_value(value).map_err(|e| e.to_string())
}

/// Overlays the fields present in `params` on top of `defaults`.
fn generation_options(defaults: &GenerationOptions, params: &Value) -> Result<GenerationOptions, String> {
    let mut merged = to_json(defaults)?;
    if let (Some(target), Some(overrides)) = (merged.as_object_mut(), params.as_object()) {
        for (key, value) in overrides {
            if target.contains_key(key) {
                target.insert(key.clone(), value.clone());
            }
        }
    }
    serde_json::from_value(merged).map_err(|e| format!("invalid options: {}", e))
}

/// Dispatch a method call to the appropriate handler.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
pub fn handle_method(app: &Mutex<App>, method: &str, params: &Value) -> Result<Value, String> {
    match method {
        // ─── Generator ───
        "generator.generate" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            let options = generation_options(&a.settings_engine.get_settings().generator, params)?;
            let password = a.generator.generate(&options).map_err(|e| e.to_string())?;
            let strength = a.generator.strength(&password);
            Ok(json!({
                "password": password,
                "strength": strength,
                "score": strength_score(&password),
                "length": options.clamped_length(),
            }))
        }
        "generator.strength" => {
            let password = str_param(params, "password")?;
            let a = app.lock().map_err(|e| e.to_string())?;
            let strength = a.generator.strength(password);
            Ok(json!({"strength": strength, "score": strength_score(password)}))
        }

        // ─── Vault ───
        "vault.list" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            to_json(&a.vault.entries())
        }
        "vault.get" => {
            let id = str_param(params, "id")?;
            let a = app.lock().map_err(|e| e.to_string())?;
            let record = a.vault.get(id).ok_or_else(|| format!("Entry not found: {}", id))?;
            to_json(record)
        }
        "vault.add" => {
            let draft: NewRecord =
                serde_json::from_value(params.clone()).map_err(|e| format!("invalid entry: {}", e))?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let record = a.vault.add_entry(draft).map_err(|e| e.to_string())?;
            to_json(&record)
        }
        "vault.update" => {
            let id = str_param(params, "id")?;
            let update: RecordUpdate =
                serde_json::from_value(params.clone()).map_err(|e| format!("invalid update: {}", e))?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let record = a.vault.update_entry(id, update).map_err(|e| e.to_string())?;
            to_json(&record)
        }
        "vault.delete" => {
            let id = str_param(params, "id")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.vault.delete_entry(id).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "vault.clear" => {
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.vault.clear_all().map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "vault.search" => {
            let filter: RecordFilter =
                serde_json::from_value(params.clone()).map_err(|e| format!("invalid filter: {}", e))?;
            let a = app.lock().map_err(|e| e.to_string())?;
            to_json(&a.vault.search(&filter))
        }
        "vault.categories" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            Ok(json!({
                "in_use": a.vault.categories(),
                "suggested": VaultManager::suggested_categories(),
                "default": a.vault.default_category(),
            }))
        }
        "vault.export" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            let data = a.vault.export_text().map_err(|e| e.to_string())?;
            Ok(json!({
                "data": data,
                "filename": export_file_name(Utc::now().date_naive()),
            }))
        }
        "vault.import" => {
            let data = str_param(params, "data")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let count = a.vault.import_text(data).map_err(|e| e.to_string())?;
            Ok(json!({"imported": count}))
        }

        // ─── Settings ───
        "settings.get" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            to_json(a.settings_engine.get_settings())
        }
        "settings.set" => {
            let key = str_param(params, "key")?;
            let value = params.get("value").cloned().ok_or("missing value")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.settings_engine.set_value(key, value).map_err(|e| e.to_string())?;
            a.apply_settings();
            Ok(json!({"ok": true}))
        }

        _ => Err(format!("unknown method: {}", method)),
    }
}
