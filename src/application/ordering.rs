use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use super::error::{ServiceError, ServiceResult};
use crate::domain::order::Order;

/// Serializes every read-check-shift-set sequence on `order`.
///
/// Lists and tasks share one gate: task inserts and moves read list existence,
/// and list deletion cascades into tasks.
#[derive(Clone, Default)]
pub struct OrderingGate(Arc<Mutex<()>>);

impl OrderingGate {
    pub fn new() -> Self { Self::default() }

    pub async fn enter(&self) -> MutexGuard<'_, ()> { self.0.lock().await }
}

/// Refuses a bulk shift that would push the highest order in a scope past `Order::MAX`.
pub fn ensure_room_to_shift(highest: Option<Order>) -> ServiceResult<()> {
    match highest {
        Some(order) if !order.can_shift() => Err(ServiceError::Conflict(format!(
            "no room to shift orders past {}",
            Order::MAX
        ))),
        _ => Ok(()),
    }
}
