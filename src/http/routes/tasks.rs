use axum::extract::{rejection::QueryRejection, Path, Query, State};
use axum::{routing::{get, put}, Router};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::application::task_service::TaskService;
use crate::domain::list::ListId;
use crate::domain::task::{CreateTask, Task, TaskFilter, TaskId, UpdateTask};
use crate::http::extract::Payload;
use crate::http::params::{parse_order, parse_uuid};
use crate::http::types::{ApiError, ApiResponse, ApiResult};

#[derive(Clone)]
pub struct AppState<S: TaskService> { pub service: S }

pub fn router<S: TaskService + Clone + Send + Sync + 'static>(state: AppState<S>) -> Router {
    Router::new()
        .route("/tasks", get(list_tasks::<S>).post(create_task::<S>))
        .route("/tasks/:id", get(get_task::<S>).put(update_task::<S>).delete(delete_task::<S>))
        .route("/tasks/:id/move", put(move_task::<S>))
        .route("/tasks/:id/order", put(update_task_order::<S>))
        .with_state(state)
}

#[derive(Deserialize)]
struct ListQuery { list: Option<String> }

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateBody {
    order: Option<Value>,
    list: Option<String>,
    description: Option<String>,
    due_date: Option<DateTime<Utc>>,
}

// id, list, order and createdAt never reach the service from this endpoint.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateBody {
    description: Option<String>,
    due_date: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
struct MoveBody { order: Option<Value>, list: Option<String> }

#[derive(Deserialize)]
struct OrderBody { order: Option<Value> }

async fn list_tasks<S: TaskService>(State(state): State<AppState<S>>, query: Result<Query<ListQuery>, QueryRejection>) -> ApiResult<Vec<Task>> {
    let Query(query) = query?;
    let list = match query.list.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => Some(parse_list(raw)?),
    };
    Ok(ApiResponse::ok(state.service.list(TaskFilter { list }).await?))
}

async fn get_task<S: TaskService>(State(state): State<AppState<S>>, Path(id): Path<String>) -> ApiResult<Task> {
    let id = parse_id(&id)?;
    Ok(ApiResponse::ok(state.service.get(id).await?))
}

async fn create_task<S: TaskService>(State(state): State<AppState<S>>, Payload(payload): Payload<CreateBody>) -> ApiResult<Task> {
    let (Some(order), Some(list)) = (payload.order.filter(|o| !o.is_null()), payload.list) else {
        return Err(ApiError::bad_request("order and list are required"));
    };
    let input = CreateTask {
        order: parse_order(Some(&order))?,
        list: parse_list(&list)?,
        description: payload.description,
        due_date: payload.due_date,
    };
    Ok(ApiResponse::created(state.service.create(input).await?))
}

async fn update_task<S: TaskService>(State(state): State<AppState<S>>, Path(id): Path<String>, Payload(payload): Payload<UpdateBody>) -> ApiResult<Task> {
    let id = parse_id(&id)?;
    let patch = UpdateTask { description: payload.description, due_date: payload.due_date };
    Ok(ApiResponse::ok(state.service.update(id, patch).await?))
}

async fn move_task<S: TaskService>(State(state): State<AppState<S>>, Path(id): Path<String>, Payload(payload): Payload<MoveBody>) -> ApiResult<Task> {
    let id = parse_id(&id)?;
    let order = parse_order(payload.order.as_ref())?;
    let list = parse_list(payload.list.as_deref().unwrap_or_default())?;
    Ok(ApiResponse::ok(state.service.move_to(id, order, list).await?))
}

async fn update_task_order<S: TaskService>(State(state): State<AppState<S>>, Path(id): Path<String>, Payload(payload): Payload<OrderBody>) -> ApiResult<Task> {
    let id = parse_id(&id)?;
    let order = parse_order(payload.order.as_ref())?;
    Ok(ApiResponse::ok(state.service.reorder(id, order).await?))
}

async fn delete_task<S: TaskService>(State(state): State<AppState<S>>, Path(id): Path<String>) -> ApiResult<Value> {
    let id = parse_id(&id)?;
    state.service.delete(id).await?;
    Ok(ApiResponse::ok(serde_json::json!({})))
}

fn parse_id(s: &str) -> Result<TaskId, ApiError> { parse_uuid(s, "id").map(TaskId) }

fn parse_list(s: &str) -> Result<ListId, ApiError> { parse_uuid(s, "list").map(ListId) }
