use async_trait::async_trait;

use super::{
    list::{CreateList, List, ListId, UpdateList},
    order::Order,
    task::{CreateTask, Task, TaskFilter, TaskId, UpdateTask},
};

/// Document-store operations over lists. Writes to `order` are only issued by
/// the application ordering services.
#[async_trait]
pub trait ListRepository: Send + Sync + 'static {
    async fn init(&self) -> anyhow::Result<()>;
    async fn create(&self, input: CreateList) -> anyhow::Result<List>;
    async fn get(&self, id: ListId) -> anyhow::Result<Option<List>>;
    /// All lists, ascending by order.
    async fn list(&self) -> anyhow::Result<Vec<List>>;
    async fn find_by_order(&self, order: Order) -> anyhow::Result<Option<List>>;
    /// Highest order held by any list.
    async fn max_order(&self) -> anyhow::Result<Option<Order>>;
    async fn update(&self, id: ListId, input: UpdateList) -> anyhow::Result<Option<List>>;
    async fn set_order(&self, id: ListId, order: Order) -> anyhow::Result<Option<List>>;
    /// Increments the order of every list with `order >= from`. Returns the number of rows shifted.
    async fn shift_from(&self, from: Order) -> anyhow::Result<u64>;
    async fn delete(&self, id: ListId) -> anyhow::Result<bool>;
}

#[async_trait]
pub trait TaskRepository: Send + Sync + 'static {
    async fn init(&self) -> anyhow::Result<()>;
    async fn create(&self, input: CreateTask) -> anyhow::Result<Task>;
    async fn get(&self, id: TaskId) -> anyhow::Result<Option<Task>>;
    async fn list(&self, filter: TaskFilter) -> anyhow::Result<Vec<Task>>;
    async fn find_by_order(&self, list: ListId, order: Order) -> anyhow::Result<Option<Task>>;
    async fn max_order(&self, list: ListId) -> anyhow::Result<Option<Order>>;
    async fn update(&self, id: TaskId, input: UpdateTask) -> anyhow::Result<Option<Task>>;
    async fn set_position(&self, id: TaskId, list: ListId, order: Order) -> anyhow::Result<Option<Task>>;
    /// Increments the order of every task in `list` with `order >= from`.
    async fn shift_from(&self, list: ListId, from: Order) -> anyhow::Result<u64>;
    async fn delete(&self, id: TaskId) -> anyhow::Result<bool>;
    async fn delete_by_list(&self, list: ListId) -> anyhow::Result<u64>;
}
