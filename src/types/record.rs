use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Category assigned when a record does not name one.
pub const DEFAULT_CATEGORY: &str = "Website";

/// Categories offered by the entry form. Records may still carry any label.
pub const SUGGESTED_CATEGORIES: [&str; 9] = [
    "Website", "App", "Work", "Personal", "Finance", "Shopping", "Social", "Gaming", "Other",
];

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

/// One saved credential.
///
/// Serialized with the camelCase field names and RFC 3339 timestamps used by
/// the persisted blob and by backup files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialRecord {
    pub id: String,
    pub title: String,
    pub username: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A record as entered by the user, before an id and timestamps are assigned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewRecord {
    pub title: String,
    pub username: String,
    pub password: String,
    pub website: Option<String>,
    pub category: Option<String>,
    pub notes: Option<String>,
}

/// Partial field merge applied by an edit. `None` leaves a field untouched.
///
/// For the optional fields, `Some(String::new())` clears the value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordUpdate {
    pub title: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub website: Option<String>,
    pub category: Option<String>,
    pub notes: Option<String>,
}

impl RecordUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.username.is_none()
            && self.password.is_none()
            && self.website.is_none()
            && self.category.is_none()
            && self.notes.is_none()
    }
}

/// Search and category filter over the collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordFilter {
    /// Case-insensitive substring matched against title, username and website.
    pub search: Option<String>,
    /// Exact category match.
    pub category: Option<String>,
}

impl RecordFilter {
    pub fn matches(&self, record: &CredentialRecord) -> bool {
        let matches_search = match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(term) => {
                let term = term.to_lowercase();
                record.title.to_lowercase().contains(&term)
                    || record.username.to_lowercase().contains(&term)
                    || record
                        .website
                        .as_deref()
                        .map(|w| w.to_lowercase().contains(&term))
                        .unwrap_or(false)
            }
        };

        let matches_category = match self.category.as_deref() {
            None | Some("") => true,
            Some(category) => record.category == category,
        };

        matches_search && matches_category
    }
}
