//! Unit tests for the RPC handler: every method dispatched by `handle_method`,
//! run against a temporary on-disk database and settings file.

use std::sync::Mutex;

use serde_json::json;
use tempfile::TempDir;

use credvault::app::App;
use credvault::rpc_handler::handle_method;

/// Create a fresh App backed by a temp directory.
fn setup() -> (Mutex<App>, TempDir) {
    let tmp = TempDir::new().expect("Failed to create temp dir");
    let config = tmp.path().join("settings.json").to_string_lossy().to_string();
    let app = App::new(&tmp.path().join("data"), Some(config)).expect("Failed to init App");
    (Mutex::new(app), tmp)
}

fn add(app: &Mutex<App>, title: &str, category: &str) -> String {
    let res = handle_method(app, "vault.add", &json!({
        "title": title,
        "username": "user",
        "password": "Secret#1",
        "category": category,
    }))
    .unwrap();
    res["id"].as_str().unwrap().to_string()
}

// ─── Unknown method ───

#[test]
fn test_unknown_method_returns_error() {
    let (app, _tmp) = setup();
    let res = handle_method(&app, "nonexistent.method", &json!({}));
    assert!(res.unwrap_err().contains("unknown method"));
}

// ─── Generator ───

#[test]
fn test_generate_uses_settings_defaults() {
    let (app, _tmp) = setup();
    let res = handle_method(&app, "generator.generate", &json!({})).unwrap();
    assert_eq!(res["password"].as_str().unwrap().chars().count(), 16);
    assert_eq!(res["length"], 16);
    assert!(res["strength"].is_string());
}

#[test]
fn test_generate_with_overrides() {
    let (app, _tmp) = setup();
    let res = handle_method(&app, "generator.generate", &json!({
        "length": 12,
        "symbols": false,
        "exclude_similar": true,
    }))
    .unwrap();
    let password = res["password"].as_str().unwrap();
    assert_eq!(password.len(), 12);
    assert!(password.chars().all(|c| c.is_ascii_alphanumeric()));
}

#[test]
fn test_generate_with_no_classes_is_empty() {
    let (app, _tmp) = setup();
    let res = handle_method(&app, "generator.generate", &json!({
        "uppercase": false, "lowercase": false, "numbers": false, "symbols": false,
    }))
    .unwrap();
    assert_eq!(res["password"], "");
}

#[test]
fn test_generate_rejects_wrong_types() {
    let (app, _tmp) = setup();
    let res = handle_method(&app, "generator.generate", &json!({"length": "long"}));
    assert!(res.unwrap_err().contains("invalid options"));
}

#[test]
fn test_strength() {
    let (app, _tmp) = setup();
    let res = handle_method(&app, "generator.strength", &json!({"password": "Tr0ub4dor&3"})).unwrap();
    assert_eq!(res, json!({"strength": "strong", "score": 6}));

    assert!(handle_method(&app, "generator.strength", &json!({})).is_err());
}

// ─── Vault ───

#[test]
fn test_add_get_list() {
    let (app, _tmp) = setup();
    let id = add(&app, "Mail", "Work");

    let got = handle_method(&app, "vault.get", &json!({"id": id})).unwrap();
    assert_eq!(got["title"], "Mail");
    assert!(got["createdAt"].is_string());

    let list = handle_method(&app, "vault.list", &json!({})).unwrap();
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[test]
fn test_add_missing_title_fails() {
    let (app, _tmp) = setup();
    let res = handle_method(&app, "vault.add", &json!({"username": "u", "password": "p"}));
    assert!(res.unwrap_err().contains("title is required"));
}

#[test]
fn test_update_and_delete() {
    let (app, _tmp) = setup();
    let id = add(&app, "Mail", "Work");

    let updated = handle_method(&app, "vault.update", &json!({"id": id, "title": "Email"})).unwrap();
    assert_eq!(updated["title"], "Email");
    assert_eq!(updated["category"], "Work");

    handle_method(&app, "vault.delete", &json!({"id": id})).unwrap();
    assert!(handle_method(&app, "vault.get", &json!({"id": id})).is_err());
    assert!(handle_method(&app, "vault.delete", &json!({"id": id})).is_err());
}

#[test]
fn test_search_and_categories() {
    let (app, _tmp) = setup();
    add(&app, "GitHub", "Work");
    add(&app, "Bank", "Finance");

    let found = handle_method(&app, "vault.search", &json!({"search": "git"})).unwrap();
    assert_eq!(found.as_array().unwrap().len(), 1);

    let cats = handle_method(&app, "vault.categories", &json!({})).unwrap();
    assert_eq!(cats["in_use"], json!(["Finance", "Work"]));
    assert_eq!(cats["default"], "Website");
    assert!(cats["suggested"].as_array().unwrap().len() >= 9);
}

#[test]
fn test_export_import_clear() {
    let (app, _tmp) = setup();
    add(&app, "A", "Work");
    add(&app, "B", "Work");

    let export = handle_method(&app, "vault.export", &json!({})).unwrap();
    let data = export["data"].as_str().unwrap().to_string();
    assert!(export["filename"].as_str().unwrap().starts_with("passwords_backup_"));

    handle_method(&app, "vault.clear", &json!({})).unwrap();
    let list = handle_method(&app, "vault.list", &json!({})).unwrap();
    assert!(list.as_array().unwrap().is_empty());

    let res = handle_method(&app, "vault.import", &json!({"data": data})).unwrap();
    assert_eq!(res["imported"], 2);

    let bad = handle_method(&app, "vault.import", &json!({"data": "not json"}));
    assert!(bad.unwrap_err().contains("Malformed"));
    let list = handle_method(&app, "vault.list", &json!({})).unwrap();
    assert_eq!(list.as_array().unwrap().len(), 2);
}

// ─── Settings ───

#[test]
fn test_settings_set_changes_default_category() {
    let (app, _tmp) = setup();
    handle_method(&app, "settings.set", &json!({"key": "default_category", "value": "Personal"})).unwrap();

    let settings = handle_method(&app, "settings.get", &json!({})).unwrap();
    assert_eq!(settings["default_category"], "Personal");

    let res = handle_method(&app, "vault.add", &json!({
        "title": "Diary", "username": "me", "password": "pw",
    }))
    .unwrap();
    assert_eq!(res["category"], "Personal");
}

#[test]
fn test_settings_set_invalid() {
    let (app, _tmp) = setup();
    assert!(handle_method(&app, "settings.set", &json!({"key": "generator.length", "value": 1})).is_err());
    assert!(handle_method(&app, "settings.set", &json!({"key": "generator.length"})).is_err());
}

#[test]
fn test_key_casing_per_payload() {
    let (app, _tmp) = setup();
    add(&app, "Mail", "Work");
    let list = handle_method(&app, "vault.list", &json!({})).unwrap();
    assert!(list[0].get("createdAt").is_some());
    assert!(list[0].get("created_at").is_none());

    handle_method(&app, "settings.set", &json!({"key": "generator.exclude_similar", "value": true})).unwrap();
    let settings = handle_method(&app, "settings.get", &json!({})).unwrap();
    assert_eq!(settings["generator"]["exclude_similar"], true);
    assert!(settings.get("storage_key").is_none());
}

// ─── Persistence ───

#[test]
fn test_vault_survives_restart() {
    let tmp = TempDir::new().unwrap();
    let config = tmp.path().join("settings.json").to_string_lossy().to_string();
    let data_dir = tmp.path().join("data");

    {
        let app = Mutex::new(App::new(&data_dir, Some(config.clone())).unwrap());
        add(&app, "Kept", "Work");
    }

    let app = Mutex::new(App::new(&data_dir, Some(config)).unwrap());
    let list = handle_method(&app, "vault.list", &json!({})).unwrap();
    assert_eq!(list[0]["title"], "Kept");
}

#[test]
fn test_storage_key_cannot_be_moved() {
    let tmp = TempDir::new().unwrap();
    let config = tmp.path().join("settings.json").to_string_lossy().to_string();
    let data_dir = tmp.path().join("data");

    {
        let app = Mutex::new(App::new(&data_dir, Some(config.clone())).unwrap());
        add(&app, "Bank", "Finance");
        let res = handle_method(&app, "settings.set", &json!({"key": "storage_key", "value": "other"}));
        assert!(res.is_err());
    }

    let app = Mutex::new(App::new(&data_dir, Some(config)).unwrap());
    let list = handle_method(&app, "vault.list", &json!({})).unwrap();
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["title"], "Bank");
}

#[test]
fn test_ephemeral_app() {
    let tmp = TempDir::new().unwrap();
    let config = tmp.path().join("settings.json").to_string_lossy().to_string();
    let app = Mutex::new(App::ephemeral(config).unwrap());
    add(&app, "Temp", "Other");
    let list = handle_method(&app, "vault.list", &json!({})).unwrap();
    assert_eq!(list.as_array().unwrap().len(), 1);
}
