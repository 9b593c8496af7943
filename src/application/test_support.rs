use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::sync::{Arc, Mutex};

use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::Utc;

use crate::domain::{
    list::{CreateList, List, ListId, UpdateList},
    order::Order,
    repository::{ListRepository, TaskRepository},
    task::{default_due_date, CreateTask, Task, TaskFilter, TaskId, UpdateTask},
};

#[derive(Clone, Default)]
pub struct InMemoryStore {
    lists: Arc<Mutex<HashMap<ListId, List>>>,
    tasks: Arc<Mutex<HashMap<TaskId, Task>>>,
    fail_task_deletes: Arc<AtomicBool>,
    fail_shifts: Arc<AtomicBool>,
}

impl InMemoryStore {
    pub fn fail_task_deletes(&self) { self.fail_task_deletes.store(true, AtomicOrdering::SeqCst); }
    pub fn fail_shifts(&self) { self.fail_shifts.store(true, AtomicOrdering::SeqCst); }

    fn check_shift(&self) -> Result<()> {
        if self.fail_shifts.load(AtomicOrdering::SeqCst) {
            bail!("bulk update rejected");
        }
        Ok(())
    }
}

pub fn order(n: i64) -> Order { Order::new(n).unwrap() }

#[async_trait]
impl ListRepository for InMemoryStore {
    async fn init(&self) -> Result<()> { Ok(()) }
    async fn create(&self, input: CreateList) -> Result<List> {
        let list = List { id: ListId::default(), title: input.title, order: input.order, created_at: Utc::now() };
        self.lists.lock().unwrap().insert(list.id, list.clone());
        Ok(list)
    }
    async fn get(&self, id: ListId) -> Result<Option<List>> { Ok(self.lists.lock().unwrap().get(&id).cloned()) }
    async fn list(&self) -> Result<Vec<List>> {
        let mut lists: Vec<List> = self.lists.lock().unwrap().values().cloned().collect();
        lists.sort_by_key(|l| l.order);
        Ok(lists)
    }
    async fn find_by_order(&self, order: Order) -> Result<Option<List>> {
        Ok(self.lists.lock().unwrap().values().find(|l| l.order == order).cloned())
    }
    async fn max_order(&self) -> Result<Option<Order>> {
        Ok(self.lists.lock().unwrap().values().map(|l| l.order).max())
    }
    async fn update(&self, id: ListId, input: UpdateList) -> Result<Option<List>> {
        let mut map = self.lists.lock().unwrap();
        let Some(list) = map.get_mut(&id) else { return Ok(None) };
        if let Some(t) = input.title { list.title = t; }
        Ok(Some(list.clone()))
    }
    async fn set_order(&self, id: ListId, order: Order) -> Result<Option<List>> {
        let mut map = self.lists.lock().unwrap();
        let Some(list) = map.get_mut(&id) else { return Ok(None) };
        list.order = order;
        Ok(Some(list.clone()))
    }
    async fn shift_from(&self, from: Order) -> Result<u64> {
        self.check_shift()?;
        let mut shifted = 0;
        for list in self.lists.lock().unwrap().values_mut().filter(|l| l.order >= from) {
            list.order = order(list.order.get() + 1);
            shifted += 1;
        }
        Ok(shifted)
    }
    async fn delete(&self, id: ListId) -> Result<bool> { Ok(self.lists.lock().unwrap().remove(&id).is_some()) }
}

#[async_trait]
impl TaskRepository for InMemoryStore {
    async fn init(&self) -> Result<()> { Ok(()) }
    async fn create(&self, input: CreateTask) -> Result<Task> {
        let now = Utc::now();
        let task = Task {
            id: TaskId::default(),
            order: input.order,
            description: input.description.unwrap_or_default(),
            due_date: input.due_date.unwrap_or_else(|| default_due_date(now)),
            created_at: now,
            list: input.list,
        };
        self.tasks.lock().unwrap().insert(task.id, task.clone());
        Ok(task)
    }
    async fn get(&self, id: TaskId) -> Result<Option<Task>> { Ok(self.tasks.lock().unwrap().get(&id).cloned()) }
    async fn list(&self, filter: TaskFilter) -> Result<Vec<Task>> {
        let mut tasks: Vec<Task> = self
            .tasks
            .lock()
            .unwrap()
            .values()
            .filter(|t| filter.list.is_none_or(|l| t.list == l))
            .cloned()
            .collect();
        tasks.sort_by_key(|t| (t.list.0, t.order));
        Ok(tasks)
    }
    async fn find_by_order(&self, list: ListId, order: Order) -> Result<Option<Task>> {
        Ok(self.tasks.lock().unwrap().values().find(|t| t.list == list && t.order == order).cloned())
    }
    async fn max_order(&self, list: ListId) -> Result<Option<Order>> {
        Ok(self.tasks.lock().unwrap().values().filter(|t| t.list == list).map(|t| t.order).max())
    }
    async fn update(&self, id: TaskId, input: UpdateTask) -> Result<Option<Task>> {
        let mut map = self.tasks.lock().unwrap();
        let Some(task) = map.get_mut(&id) else { return Ok(None) };
        if let Some(d) = input.description { task.description = d; }
        if let Some(d) = input.due_date { task.due_date = d; }
        Ok(Some(task.clone()))
    }
    async fn set_position(&self, id: TaskId, list: ListId, order: Order) -> Result<Option<Task>> {
        let mut map = self.tasks.lock().unwrap();
        let Some(task) = map.get_mut(&id) else { return Ok(None) };
        task.list = list;
        task.order = order;
        Ok(Some(task.clone()))
    }
    async fn shift_from(&self, list: ListId, from: Order) -> Result<u64> {
        self.check_shift()?;
        let mut shifted = 0;
        for task in self.tasks.lock().unwrap().values_mut().filter(|t| t.list == list && t.order >= from) {
            task.order = order(task.order.get() + 1);
            shifted += 1;
        }
        Ok(shifted)
    }
    async fn delete(&self, id: TaskId) -> Result<bool> { Ok(self.tasks.lock().unwrap().remove(&id).is_some()) }
    async fn delete_by_list(&self, list: ListId) -> Result<u64> {
        if self.fail_task_deletes.load(AtomicOrdering::SeqCst) {
            bail!("task store unavailable");
        }
        let mut map = self.tasks.lock().unwrap();
        let before = map.len();
        map.retain(|_, t| t.list != list);
        Ok((before - map.len()) as u64)
    }
}
