pub use super::routes::{lists, tasks};

use axum::{routing::get, Router};

/// Mounts the resource routers at the root and under `/api/v1`.
pub fn app(router: Router) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .nest("/api/v1", router.clone())
        .merge(router)
}
