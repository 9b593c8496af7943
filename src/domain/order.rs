use serde::{Deserialize, Serialize};

/// Position of an entity within its scope, starting at 1.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "i64", into = "i64")]
pub struct Order(i64);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("order must be an integer between 1 and {max}, got {0}", max = Order::MAX)]
pub struct InvalidOrder(pub i64);

impl Order {
    /// Highest rank a caller may request. Leaves headroom for bulk shifts in 64-bit storage.
    pub const MAX: i64 = i32::MAX as i64;

    pub fn new(value: i64) -> Result<Self, InvalidOrder> {
        if (1..=Self::MAX).contains(&value) { Ok(Self(value)) } else { Err(InvalidOrder(value)) }
    }

    /// Whether every order at or above this one can still be shifted up by one.
    pub fn can_shift(self) -> bool { self.0 < Self::MAX }

    pub fn get(self) -> i64 { self.0 }
}

impl TryFrom<i64> for Order {
    type Error = InvalidOrder;
    fn try_from(value: i64) -> Result<Self, Self::Error> { Self::new(value) }
}

impl From<Order> for i64 {
    fn from(order: Order) -> Self { order.0 }
}

impl std::fmt::Display for Order {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{}", self.0) }
}
