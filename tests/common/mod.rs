use axum::body::{to_bytes, Body};
use axum::Router;
use serde_json::Value;
use taskboard::{build_app, infrastructure::sqlite_repo::SqliteRepository};

pub async fn app() -> Router {
    // use in-memory sqlite for tests
    let repo = SqliteRepository::connect("sqlite::memory:").await.unwrap();
    repo.init().await.unwrap();
    build_app(repo)
}

pub async fn request(app: &Router, method: &str, path: &str, body: Option<Value>) -> (u16, Value) {
    match body {
        Some(json) => send(app, method, path, Some(("application/json", json.to_string()))).await,
        None => send(app, method, path, None).await,
    }
}

pub async fn request_form(app: &Router, method: &str, path: &str, form: &str) -> (u16, Value) {
    send(app, method, path, Some(("application/x-www-form-urlencoded", form.to_string()))).await
}

async fn send(app: &Router, method: &str, path: &str, body: Option<(&str, String)>) -> (u16, Value) {
    use axum::http::{Method, Request};
    use tower::ServiceExt;

    let req = Request::builder().method(Method::from_bytes(method.as_bytes()).unwrap()).uri(path);
    let req = match body {
        Some((content_type, body)) => req.header("content-type", content_type).body(Body::from(body)).unwrap(),
        None => req.body(Body::empty()).unwrap(),
    };
    let res: hyper::Response<Body> = app.clone().oneshot(req).await.unwrap();
    let status = res.status().as_u16();
    let bytes = to_bytes(res.into_body(), 1024 * 1024).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

pub fn id_of(body: &Value) -> String { body["data"]["id"].as_str().unwrap().to_string() }

pub async fn create_list(app: &Router, title: &str, order: i64) -> String {
    let (status, body) = request(app, "POST", "/lists", Some(serde_json::json!({ "title": title, "order": order }))).await;
    assert_eq!(status, 201, "{body}");
    id_of(&body)
}

pub async fn create_task(app: &Router, list: &str, order: i64) -> String {
    let (status, body) = request(app, "POST", "/tasks", Some(serde_json::json!({ "list": list, "order": order }))).await;
    assert_eq!(status, 201, "{body}");
    id_of(&body)
}

pub async fn order_of(app: &Router, path: &str) -> i64 {
    let (status, body) = request(app, "GET", path, None).await;
    assert_eq!(status, 200, "{body}");
    body["data"]["order"].as_i64().unwrap()
}
