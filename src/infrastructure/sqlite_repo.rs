use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{sqlite::{SqlitePoolOptions, SqliteRow}, Pool, Row, Sqlite};
use uuid::Uuid;

use crate::domain::{
    list::{CreateList, List, ListId, UpdateList},
    order::Order,
    repository::{ListRepository, TaskRepository},
    task::{default_due_date, CreateTask, Task, TaskFilter, TaskId, UpdateTask},
};

const LIST_COLUMNS: &str = "id, title, position, created_at";
const TASK_COLUMNS: &str = "id, position, description, due_date, created_at, list_id";

/// Lists and tasks in one SQLite database.
#[derive(Clone)]
pub struct SqliteRepository {
    pool: Arc<Pool<Sqlite>>,
}

impl SqliteRepository {
    pub async fn connect(database_url: &str) -> Result<Self> {
        // every connection to an in-memory URL opens a fresh database
        let options = if database_url.contains(":memory:") {
            SqlitePoolOptions::new().max_connections(1).idle_timeout(None).max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };
        let pool = options
            .connect(database_url)
            .await
            .with_context(|| format!("failed to open {database_url}"))?;
        Ok(Self { pool: Arc::new(pool) })
    }

    pub async fn init(&self) -> Result<()> {
        ListRepository::init(self).await?;
        TaskRepository::init(self).await
    }
}

#[async_trait]
impl ListRepository for SqliteRepository {
    async fn init(&self) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS lists (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                position INTEGER NOT NULL,
                created_at TEXT NOT NULL
            )",
        )
        .execute(&*self.pool)
        .await?;
        Ok(())
    }

    async fn create(&self, input: CreateList) -> Result<List> {
        let list = List { id: ListId::default(), title: input.title, order: input.order, created_at: Utc::now() };
        sqlx::query("INSERT INTO lists (id, title, position, created_at) VALUES (?1, ?2, ?3, ?4)")
            .bind(list.id.0.to_string())
            .bind(&list.title)
            .bind(list.order.get())
            .bind(list.created_at.to_rfc3339())
            .execute(&*self.pool)
            .await?;
        Ok(list)
    }

    async fn get(&self, id: ListId) -> Result<Option<List>> {
        let row = sqlx::query(&format!("SELECT {LIST_COLUMNS} FROM lists WHERE id = ?1"))
            .bind(id.0.to_string())
            .fetch_optional(&*self.pool)
            .await?;
        row.map(row_to_list).transpose()
    }

    async fn list(&self) -> Result<Vec<List>> {
        let rows = sqlx::query(&format!("SELECT {LIST_COLUMNS} FROM lists ORDER BY position ASC, created_at ASC"))
            .fetch_all(&*self.pool)
            .await?;
        rows.into_iter().map(row_to_list).collect()
    }

    async fn find_by_order(&self, order: Order) -> Result<Option<List>> {
        let row = sqlx::query(&format!("SELECT {LIST_COLUMNS} FROM lists WHERE position = ?1 LIMIT 1"))
            .bind(order.get())
            .fetch_optional(&*self.pool)
            .await?;
        row.map(row_to_list).transpose()
    }

    async fn max_order(&self) -> Result<Option<Order>> {
        let highest: Option<i64> = sqlx::query_scalar("SELECT MAX(position) FROM lists")
            .fetch_one(&*self.pool)
            .await?;
        Ok(highest.map(Order::new).transpose()?)
    }

    async fn update(&self, id: ListId, input: UpdateList) -> Result<Option<List>> {
        let Some(mut list) = ListRepository::get(self, id).await? else { return Ok(None) };
        if let Some(t) = input.title { list.title = t; }

        sqlx::query("UPDATE lists SET title = ?2 WHERE id = ?1")
            .bind(id.0.to_string())
            .bind(&list.title)
            .execute(&*self.pool)
            .await?;
        Ok(Some(list))
    }

    async fn set_order(&self, id: ListId, order: Order) -> Result<Option<List>> {
        let result = sqlx::query("UPDATE lists SET position = ?2 WHERE id = ?1")
            .bind(id.0.to_string())
            .bind(order.get())
            .execute(&*self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }
        ListRepository::get(self, id).await
    }

    async fn shift_from(&self, from: Order) -> Result<u64> {
        let result = sqlx::query("UPDATE lists SET position = position + 1 WHERE position >= ?1")
            .bind(from.get())
            .execute(&*self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn delete(&self, id: ListId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM lists WHERE id = ?1")
            .bind(id.0.to_string())
            .execute(&*self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl TaskRepository for SqliteRepository {
    async fn init(&self) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS tasks (
                id TEXT PRIMARY KEY,
                position INTEGER NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                due_date TEXT NOT NULL,
                created_at TEXT NOT NULL,
                list_id TEXT NOT NULL
            )",
        )
        .execute(&*self.pool)
        .await?;
        sqlx::query("CREATE INDEX IF NOT EXISTS tasks_list_position ON tasks (list_id, position)")
            .execute(&*self.pool)
            .await?;
        Ok(())
    }

    async fn create(&self, input: CreateTask) -> Result<Task> {
        let now = Utc::now();
        let task = Task {
            id: TaskId::default(),
            order: input.order,
            description: input.description.unwrap_or_default(),
            due_date: input.due_date.unwrap_or_else(|| default_due_date(now)),
            created_at: now,
            list: input.list,
        };
        sqlx::query(
            "INSERT INTO tasks (id, position, description, due_date, created_at, list_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(task.id.0.to_string())
        .bind(task.order.get())
        .bind(&task.description)
        .bind(task.due_date.to_rfc3339())
        .bind(task.created_at.to_rfc3339())
        .bind(task.list.0.to_string())
        .execute(&*self.pool)
        .await?;
        Ok(task)
    }

    async fn get(&self, id: TaskId) -> Result<Option<Task>> {
        let row = sqlx::query(&format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1"))
            .bind(id.0.to_string())
            .fetch_optional(&*self.pool)
            .await?;
        row.map(row_to_task).transpose()
    }

    async fn list(&self, filter: TaskFilter) -> Result<Vec<Task>> {
        let rows = match filter.list {
            Some(list) => {
                sqlx::query(&format!("SELECT {TASK_COLUMNS} FROM tasks WHERE list_id = ?1 ORDER BY position ASC"))
                    .bind(list.0.to_string())
                    .fetch_all(&*self.pool)
                    .await?
            }
            None => {
                sqlx::query(&format!("SELECT {TASK_COLUMNS} FROM tasks ORDER BY list_id ASC, position ASC"))
                    .fetch_all(&*self.pool)
                    .await?
            }
        };
        rows.into_iter().map(row_to_task).collect()
    }

    async fn find_by_order(&self, list: ListId, order: Order) -> Result<Option<Task>> {
        let row = sqlx::query(&format!("SELECT {TASK_COLUMNS} FROM tasks WHERE list_id = ?1 AND position = ?2 LIMIT 1"))
            .bind(list.0.to_string())
            .bind(order.get())
            .fetch_optional(&*self.pool)
            .await?;
        row.map(row_to_task).transpose()
    }

    async fn max_order(&self, list: ListId) -> Result<Option<Order>> {
        let highest: Option<i64> = sqlx::query_scalar("SELECT MAX(position) FROM tasks WHERE list_id = ?1")
            .bind(list.0.to_string())
            .fetch_one(&*self.pool)
            .await?;
        Ok(highest.map(Order::new).transpose()?)
    }

    async fn update(&self, id: TaskId, input: UpdateTask) -> Result<Option<Task>> {
        let Some(mut task) = TaskRepository::get(self, id).await? else { return Ok(None) };
        if let Some(d) = input.description { task.description = d; }
        if let Some(d) = input.due_date { task.due_date = d; }

        sqlx::query("UPDATE tasks SET description = ?2, due_date = ?3 WHERE id = ?1")
            .bind(id.0.to_string())
            .bind(&task.description)
            .bind(task.due_date.to_rfc3339())
            .execute(&*self.pool)
            .await?;
        Ok(Some(task))
    }

    async fn set_position(&self, id: TaskId, list: ListId, order: Order) -> Result<Option<Task>> {
        let result = sqlx::query("UPDATE tasks SET list_id = ?2, position = ?3 WHERE id = ?1")
            .bind(id.0.to_string())
            .bind(list.0.to_string())
            .bind(order.get())
            .execute(&*self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }
        TaskRepository::get(self, id).await
    }

    async fn shift_from(&self, list: ListId, from: Order) -> Result<u64> {
        let result = sqlx::query("UPDATE tasks SET position = position + 1 WHERE list_id = ?1 AND position >= ?2")
            .bind(list.0.to_string())
            .bind(from.get())
            .execute(&*self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn delete(&self, id: TaskId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ?1")
            .bind(id.0.to_string())
            .execute(&*self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_list(&self, list: ListId) -> Result<u64> {
        let result = sqlx::query("DELETE FROM tasks WHERE list_id = ?1")
            .bind(list.0.to_string())
            .execute(&*self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

fn row_to_list(row: SqliteRow) -> Result<List> {
    let id_str: String = row.try_get("id")?;
    let position: i64 = row.try_get("position")?;
    let created_at_str: String = row.try_get("created_at")?;

    Ok(List {
        id: ListId(Uuid::parse_str(&id_str)?),
        title: row.try_get("title")?,
        order: Order::new(position)?,
        created_at: parse_timestamp(&created_at_str)?,
    })
}

fn row_to_task(row: SqliteRow) -> Result<Task> {
    let id_str: String = row.try_get("id")?;
    let list_str: String = row.try_get("list_id")?;
    let position: i64 = row.try_get("position")?;
    let due_date_str: String = row.try_get("due_date")?;
    let created_at_str: String = row.try_get("created_at")?;

    Ok(Task {
        id: TaskId(Uuid::parse_str(&id_str)?),
        order: Order::new(position)?,
        description: row.try_get("description")?,
        due_date: parse_timestamp(&due_date_str)?,
        created_at: parse_timestamp(&created_at_str)?,
        list: ListId(Uuid::parse_str(&list_str)?),
    })
}

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(s)
        .with_context(|| format!("invalid timestamp {s:?}"))?
        .with_timezone(&Utc))
}

/// Creates the database file (and parent directory) behind a `sqlite://` URL.
pub fn prepare_sqlite_file(database_url: &str) -> Result<()> {
    if database_url.contains(":memory:") { return Ok(()); }
    if let Some(path) = database_url.strip_prefix("sqlite://") {
        let path = path.split('?').next().unwrap_or(path);
        // On Windows, absolute paths may look like /C:/path; strip the leading slash
        let path = if cfg!(windows) && path.len() >= 3 && path.as_bytes()[0] == b'/' && path.as_bytes()[2] == b':' {
            &path[1..]
        } else {
            path
        };
        use std::{fs, fs::OpenOptions, path::Path};
        let p = Path::new(path);
        if let Some(parent) = p.parent() { if !parent.as_os_str().is_empty() { fs::create_dir_all(parent)?; } }
        if !p.exists() {
            OpenOptions::new().create(true).append(true).open(p)
                .with_context(|| format!("failed to create {}", p.display()))?;
        }
    }
    Ok(())
}
