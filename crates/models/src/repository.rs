use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::errors::ModelError;

/// One repository entry in the catalog.
/// - `id` is assigned once at creation and never changes
/// - `likes` starts at 0 and only grows through the like operation
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Repository {
    pub id: Uuid,
    pub title: String,
    pub url: String,
    pub techs: Vec<String>,
    pub likes: u64,
}

/// Validated input for creating a repository: id/likes are server-assigned.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CreateRepository {
    pub title: String,
    pub url: String,
    pub techs: Vec<String>,
}

/// Partial update: absent or empty fields keep the stored value.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct UpdateRepository {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub techs: Option<Vec<String>>,
}

/// Emptiness predicate over raw JSON: null, "", [] and {} all count as empty.
pub fn value_is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

fn required_string(body: &Value, field: &'static str) -> Result<String, ModelError> {
    let value = body.get(field).unwrap_or(&Value::Null);
    if value_is_empty(value) {
        return Err(ModelError::EmptyField(field));
    }
    value
        .as_str()
        .map(str::to_owned)
        .ok_or(ModelError::InvalidType(field))
}

fn required_string_seq(body: &Value, field: &'static str) -> Result<Vec<String>, ModelError> {
    let value = body.get(field).unwrap_or(&Value::Null);
    if value_is_empty(value) {
        return Err(ModelError::EmptyField(field));
    }
    let items = value.as_array().ok_or(ModelError::InvalidType(field))?;
    items
        .iter()
        .map(|item| item.as_str().map(str::to_owned).ok_or(ModelError::InvalidType(field)))
        .collect()
}

impl CreateRepository {
    /// Build a validated input from a raw JSON body.
    ///
    /// Presence check: each of `title`, `url`, `techs` must be there and
    /// non-empty. `techs` must additionally be a sequence of strings.
    pub fn from_value(body: &Value) -> Result<Self, ModelError> {
        let title = required_string(body, "title")?;
        let url = required_string(body, "url")?;
        let techs = required_string_seq(body, "techs")?;
        Ok(Self { title, url, techs })
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        if self.title.is_empty() {
            return Err(ModelError::EmptyField("title"));
        }
        if self.url.is_empty() {
            return Err(ModelError::EmptyField("url"));
        }
        if self.techs.is_empty() {
            return Err(ModelError::EmptyField("techs"));
        }
        Ok(())
    }
}

impl UpdateRepository {
    /// Merge-by-presence: a supplied non-empty field wins, everything else is
    /// carried over from the stored record. `id` and `likes` always carry over.
    pub fn merge_into(self, existing: &Repository) -> Repository {
        Repository {
            id: existing.id,
            title: self
                .title
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| existing.title.clone()),
            url: self
                .url
                .filter(|u| !u.is_empty())
                .unwrap_or_else(|| existing.url.clone()),
            techs: self
                .techs
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| existing.techs.clone()),
            likes: existing.likes,
        }
    }
}
