use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::order::Order;

pub const TITLE_MAX_CHARS: usize = 50;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ListId(pub Uuid);

impl Default for ListId {
    fn default() -> Self { Self(Uuid::new_v4()) }
}

impl std::fmt::Display for ListId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{}", self.0) }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct List {
    pub id: ListId,
    pub title: String,
    pub order: Order,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateList {
    pub title: String,
    pub order: Order,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateList {
    pub title: Option<String>,
}

/// Trims a list title and checks its length.
pub fn normalize_title(raw: &str) -> Result<String, String> {
    let title = raw.trim();
    match title.chars().count() {
        0 => Err("title is required".into()),
        n if n > TITLE_MAX_CHARS => Err(format!("title can not be more than {TITLE_MAX_CHARS} characters")),
        _ => Ok(title.to_string()),
    }
}
