pub mod application;
pub mod config;
pub mod domain;
pub mod http;
pub mod infrastructure;

use axum::Router;

use crate::application::{list_service::ListServiceImpl, ordering::OrderingGate, task_service::TaskServiceImpl};
use crate::http::routing::{self, lists, tasks};
use crate::infrastructure::sqlite_repo::SqliteRepository;

/// Wires both ordering services over one store and one ordering gate.
pub fn build_app(repo: SqliteRepository) -> Router {
    let gate = OrderingGate::new();
    let list_service = ListServiceImpl::new(repo.clone(), repo.clone(), gate.clone());
    let task_service = TaskServiceImpl::new(repo.clone(), repo, gate);
    routing::app(
        lists::router(lists::AppState { service: list_service })
            .merge(tasks::router(tasks::AppState { service: task_service })),
    )
}
