use async_trait::async_trait;
use chrono::Utc;

use super::{
    error::{ServiceError, ServiceResult},
    ordering::{ensure_room_to_shift, OrderingGate},
};
use crate::domain::{
    list::ListId,
    order::Order,
    repository::{ListRepository, TaskRepository},
    task::{default_due_date, normalize_description, CreateTask, Task, TaskFilter, TaskId, UpdateTask},
};

#[async_trait]
pub trait TaskService: Send + Sync + 'static {
    async fn create(&self, input: CreateTask) -> ServiceResult<Task>;
    async fn get(&self, id: TaskId) -> ServiceResult<Task>;
    async fn list(&self, filter: TaskFilter) -> ServiceResult<Vec<Task>>;
    async fn update(&self, id: TaskId, input: UpdateTask) -> ServiceResult<Task>;
    /// Places a task at `order` within its current list, shifting the rest down on collision.
    async fn reorder(&self, id: TaskId, order: Order) -> ServiceResult<Task>;
    /// Moves a task to `order` in `list`. Collisions are rejected, never shifted.
    async fn move_to(&self, id: TaskId, order: Order, list: ListId) -> ServiceResult<Task>;
    async fn delete(&self, id: TaskId) -> ServiceResult<()>;
}

#[derive(Clone)]
pub struct TaskServiceImpl<L: ListRepository, T: TaskRepository> {
    lists: L,
    tasks: T,
    gate: OrderingGate,
}

impl<L: ListRepository, T: TaskRepository> TaskServiceImpl<L, T> {
    pub fn new(lists: L, tasks: T, gate: OrderingGate) -> Self { Self { lists, tasks, gate } }

    async fn ensure_list(&self, list: ListId) -> ServiceResult<()> {
        match self.lists.get(list).await? {
            Some(_) => Ok(()),
            None => Err(ServiceError::NotFound(format!("No list with the id of {list}"))),
        }
    }
}

fn not_found(id: TaskId) -> ServiceError { ServiceError::NotFound(format!("No task with the id of {id}")) }

fn conflict(list: ListId, order: Order) -> ServiceError {
    ServiceError::Conflict(format!("Task with order {order} already exists in list {list}"))
}

fn description(raw: Option<String>) -> ServiceResult<Option<String>> {
    raw.as_deref().map(normalize_description).transpose().map_err(ServiceError::Validation)
}

#[async_trait]
impl<L: ListRepository, T: TaskRepository> TaskService for TaskServiceImpl<L, T> {
    async fn create(&self, input: CreateTask) -> ServiceResult<Task> {
        let description = description(input.description)?;
        let _guard = self.gate.enter().await;
        self.ensure_list(input.list).await?;
        if self.tasks.find_by_order(input.list, input.order).await?.is_some() {
            return Err(conflict(input.list, input.order));
        }
        let due_date = input.due_date.unwrap_or_else(|| default_due_date(Utc::now()));
        let task = self
            .tasks
            .create(CreateTask { description, due_date: Some(due_date), ..input })
            .await?;
        tracing::info!(id = %task.id, list = %task.list, order = %task.order, "task created");
        Ok(task)
    }

    async fn get(&self, id: TaskId) -> ServiceResult<Task> {
        self.tasks.get(id).await?.ok_or_else(|| not_found(id))
    }

    async fn list(&self, filter: TaskFilter) -> ServiceResult<Vec<Task>> { Ok(self.tasks.list(filter).await?) }

    async fn update(&self, id: TaskId, input: UpdateTask) -> ServiceResult<Task> {
        let patch = UpdateTask { description: description(input.description)?, due_date: input.due_date };
        let task = self.tasks.update(id, patch).await?.ok_or_else(|| not_found(id))?;
        tracing::info!(%id, "task updated");
        Ok(task)
    }

    async fn reorder(&self, id: TaskId, order: Order) -> ServiceResult<Task> {
        let _guard = self.gate.enter().await;
        let Some(current) = self.tasks.get(id).await? else { return Err(not_found(id)) };
        if current.order == order {
            return Ok(current);
        }
        if let Some(holder) = self.tasks.find_by_order(current.list, order).await? {
            if holder.id != id {
                ensure_room_to_shift(self.tasks.max_order(current.list).await?)?;
                let shifted = self.tasks.shift_from(current.list, order).await?;
                tracing::debug!(list = %current.list, from = %order, shifted, "tasks shifted to make room");
            }
        }
        let task = self
            .tasks
            .set_position(id, current.list, order)
            .await?
            .ok_or_else(|| not_found(id))?;
        tracing::info!(%id, list = %task.list, from = %current.order, to = %order, "task reordered");
        Ok(task)
    }

    async fn move_to(&self, id: TaskId, order: Order, list: ListId) -> ServiceResult<Task> {
        let _guard = self.gate.enter().await;
        let Some(current) = self.tasks.get(id).await? else { return Err(not_found(id)) };
        self.ensure_list(list).await?;
        if let Some(holder) = self.tasks.find_by_order(list, order).await? {
            if holder.id == id {
                return Ok(current);
            }
            return Err(conflict(list, order));
        }
        let task = self.tasks.set_position(id, list, order).await?.ok_or_else(|| not_found(id))?;
        tracing::info!(%id, from_list = %current.list, to_list = %list, %order, "task moved");
        Ok(task)
    }

    async fn delete(&self, id: TaskId) -> ServiceResult<()> {
        let _guard = self.gate.enter().await;
        if !self.tasks.delete(id).await? {
            return Err(not_found(id));
        }
        tracing::info!(%id, "task deleted");
        Ok(())
    }
}
