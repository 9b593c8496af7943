pub mod list;
pub mod order;
pub mod repository;
pub mod task;
