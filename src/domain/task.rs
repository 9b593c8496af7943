use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{list::ListId, order::Order};

pub const DESCRIPTION_MAX_CHARS: usize = 500;
pub const DEFAULT_DUE_IN_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TaskId(pub Uuid);

impl Default for TaskId {
    fn default() -> Self { Self(Uuid::new_v4()) }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{}", self.0) }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub order: Order,
    pub description: String,
    pub due_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub list: ListId,
}

#[derive(Debug, Clone)]
pub struct CreateTask {
    pub order: Order,
    pub list: ListId,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
}

/// Only the free-form fields of a task; ordering and scope change elsewhere.
#[derive(Debug, Clone, Default)]
pub struct UpdateTask {
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TaskFilter {
    pub list: Option<ListId>,
}

pub fn default_due_date(created_at: DateTime<Utc>) -> DateTime<Utc> {
    created_at + Duration::days(DEFAULT_DUE_IN_DAYS)
}

pub fn normalize_description(raw: &str) -> Result<String, String> {
    let description = raw.trim();
    if description.chars().count() > DESCRIPTION_MAX_CHARS {
        return Err(format!("description can not be more than {DESCRIPTION_MAX_CHARS} characters"));
    }
    Ok(description.to_string())
}
