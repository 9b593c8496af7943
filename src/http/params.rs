//! Coercion of loosely typed request values into domain types.

use serde_json::Value;
use uuid::Uuid;

use super::types::ApiError;
use crate::domain::order::Order;

/// Accepts `3`, `3.0` or `"3"`; anything that is not an integer in `1..=Order::MAX` is rejected.
pub fn parse_order(value: Option<&Value>) -> Result<Order, ApiError> {
    let raw = match value {
        None | Some(Value::Null) => return Err(ApiError::bad_request("order is required")),
        Some(Value::Number(n)) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && (1.0..=Order::MAX as f64).contains(f))
                .map(|f| f as i64)
        }),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        Some(_) => None,
    };
    raw.and_then(|n| Order::new(n).ok()).ok_or_else(|| ApiError::bad_request("order is invalid"))
}

pub fn parse_uuid(raw: &str, what: &str) -> Result<Uuid, ApiError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ApiError::bad_request(format!("{what} is required")));
    }
    Uuid::parse_str(raw).map_err(|_| ApiError::bad_request(format!("{what} is invalid")))
}
