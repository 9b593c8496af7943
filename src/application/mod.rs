pub mod cascade;
pub mod error;
pub mod list_service;
pub mod ordering;
pub mod task_service;

#[cfg(test)]
mod test_support;
