use axum::extract::{Path, State};
use axum::{routing::{get, put}, Router};
use serde::Deserialize;
use serde_json::Value;

use crate::application::list_service::ListService;
use crate::domain::list::{CreateList, List, ListId, UpdateList};
use crate::http::extract::Payload;
use crate::http::params::{parse_order, parse_uuid};
use crate::http::types::{ApiError, ApiResponse, ApiResult};

#[derive(Clone)]
pub struct AppState<S: ListService> { pub service: S }

pub fn router<S: ListService + Clone + Send + Sync + 'static>(state: AppState<S>) -> Router {
    Router::new()
        .route("/lists", get(list_lists::<S>).post(create_list::<S>))
        .route("/lists/:id", get(get_list::<S>).put(update_list::<S>).delete(delete_list::<S>))
        .route("/lists/:id/order", put(update_list_order::<S>))
        .with_state(state)
}

#[derive(Deserialize)]
struct CreateBody { title: Option<String>, order: Option<Value> }

// Anything besides the title (id, order, createdAt) is dropped here.
#[derive(Deserialize)]
struct UpdateBody { title: Option<String> }

#[derive(Deserialize)]
struct OrderBody { order: Option<Value> }

async fn list_lists<S: ListService>(State(state): State<AppState<S>>) -> ApiResult<Vec<List>> {
    Ok(ApiResponse::ok(state.service.list().await?))
}

async fn get_list<S: ListService>(State(state): State<AppState<S>>, Path(id): Path<String>) -> ApiResult<List> {
    let id = parse_id(&id)?;
    Ok(ApiResponse::ok(state.service.get(id).await?))
}

async fn create_list<S: ListService>(State(state): State<AppState<S>>, Payload(payload): Payload<CreateBody>) -> ApiResult<List> {
    let (Some(title), Some(order)) = (payload.title, payload.order.filter(|o| !o.is_null())) else {
        return Err(ApiError::bad_request("title and order are required"));
    };
    let order = parse_order(Some(&order))?;
    Ok(ApiResponse::created(state.service.create(CreateList { title, order }).await?))
}

async fn update_list<S: ListService>(State(state): State<AppState<S>>, Path(id): Path<String>, Payload(payload): Payload<UpdateBody>) -> ApiResult<List> {
    let id = parse_id(&id)?;
    Ok(ApiResponse::ok(state.service.update(id, UpdateList { title: payload.title }).await?))
}

async fn update_list_order<S: ListService>(State(state): State<AppState<S>>, Path(id): Path<String>, Payload(payload): Payload<OrderBody>) -> ApiResult<List> {
    let id = parse_id(&id)?;
    let order = parse_order(payload.order.as_ref())?;
    Ok(ApiResponse::ok(state.service.reassign(id, order).await?))
}

async fn delete_list<S: ListService>(State(state): State<AppState<S>>, Path(id): Path<String>) -> ApiResult<Value> {
    let id = parse_id(&id)?;
    state.service.delete(id).await?;
    Ok(ApiResponse::ok(serde_json::json!({})))
}

fn parse_id(s: &str) -> Result<ListId, ApiError> { parse_uuid(s, "id").map(ListId) }
