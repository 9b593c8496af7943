use crate::domain::{list::ListId, repository::TaskRepository};

/// Removes the tasks of a list once the list itself is gone.
#[derive(Clone)]
pub struct CascadeDeleter<T: TaskRepository> {
    tasks: T,
}

impl<T: TaskRepository> CascadeDeleter<T> {
    pub fn new(tasks: T) -> Self { Self { tasks } }

    /// Never fails: tasks left behind by a storage error stay orphaned.
    pub async fn list_removed(&self, list: ListId) -> u64 {
        match self.tasks.delete_by_list(list).await {
            Ok(removed) => {
                tracing::info!(%list, removed, "tasks removed with list");
                removed
            }
            Err(error) => {
                tracing::warn!(%list, %error, "cascade delete failed, tasks orphaned");
                0
            }
        }
    }
}
