pub mod lists;
pub mod tasks;
