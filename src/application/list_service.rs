use async_trait::async_trait;

use super::{
    cascade::CascadeDeleter,
    error::{ServiceError, ServiceResult},
    ordering::{ensure_room_to_shift, OrderingGate},
};
use crate::domain::{
    list::{normalize_title, CreateList, List, ListId, UpdateList},
    order::Order,
    repository::{ListRepository, TaskRepository},
};

#[async_trait]
pub trait ListService: Send + Sync + 'static {
    async fn create(&self, input: CreateList) -> ServiceResult<List>;
    async fn get(&self, id: ListId) -> ServiceResult<List>;
    async fn list(&self) -> ServiceResult<Vec<List>>;
    async fn update(&self, id: ListId, input: UpdateList) -> ServiceResult<List>;
    async fn reassign(&self, id: ListId, order: Order) -> ServiceResult<List>;
    async fn delete(&self, id: ListId) -> ServiceResult<()>;
}

#[derive(Clone)]
pub struct ListServiceImpl<L: ListRepository, T: TaskRepository> {
    lists: L,
    cascade: CascadeDeleter<T>,
    gate: OrderingGate,
}

impl<L: ListRepository, T: TaskRepository> ListServiceImpl<L, T> {
    pub fn new(lists: L, tasks: T, gate: OrderingGate) -> Self {
        Self { lists, cascade: CascadeDeleter::new(tasks), gate }
    }
}

fn not_found(id: ListId) -> ServiceError { ServiceError::NotFound(format!("No list with the id of {id}")) }

#[async_trait]
impl<L: ListRepository, T: TaskRepository> ListService for ListServiceImpl<L, T> {
    async fn create(&self, input: CreateList) -> ServiceResult<List> {
        let title = normalize_title(&input.title).map_err(ServiceError::Validation)?;
        let _guard = self.gate.enter().await;
        if self.lists.find_by_order(input.order).await?.is_some() {
            return Err(ServiceError::Conflict(format!("List with order {} already exists", input.order)));
        }
        let list = self.lists.create(CreateList { title, order: input.order }).await?;
        tracing::info!(id = %list.id, order = %list.order, "list created");
        Ok(list)
    }

    async fn get(&self, id: ListId) -> ServiceResult<List> {
        self.lists.get(id).await?.ok_or_else(|| not_found(id))
    }

    async fn list(&self) -> ServiceResult<Vec<List>> { Ok(self.lists.list().await?) }

    async fn update(&self, id: ListId, input: UpdateList) -> ServiceResult<List> {
        let title = input
            .title
            .as_deref()
            .map(normalize_title)
            .transpose()
            .map_err(ServiceError::Validation)?;
        let list = self.lists.update(id, UpdateList { title }).await?.ok_or_else(|| not_found(id))?;
        tracing::info!(%id, "list updated");
        Ok(list)
    }

    async fn reassign(&self, id: ListId, order: Order) -> ServiceResult<List> {
        let _guard = self.gate.enter().await;
        let Some(current) = self.lists.get(id).await? else { return Err(not_found(id)) };
        if current.order == order {
            return Ok(current);
        }
        if let Some(holder) = self.lists.find_by_order(order).await? {
            if holder.id != id {
                ensure_room_to_shift(self.lists.max_order().await?)?;
                let shifted = self.lists.shift_from(order).await?;
                tracing::debug!(from = %order, shifted, "lists shifted to make room");
            }
        }
        let list = self.lists.set_order(id, order).await?.ok_or_else(|| not_found(id))?;
        tracing::info!(%id, from = %current.order, to = %order, "list reordered");
        Ok(list)
    }

    async fn delete(&self, id: ListId) -> ServiceResult<()> {
        let _guard = self.gate.enter().await;
        if !self.lists.delete(id).await? {
            return Err(not_found(id));
        }
        tracing::info!(%id, "list deleted");
        self.cascade.list_removed(id).await;
        Ok(())
    }
}
