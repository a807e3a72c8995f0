//! `PostgreSQL` adapters for task lifecycle persistence.

mod models;
mod repository;
mod schema;

#[cfg(test)]
mod tests;

pub use repository::{CREATE_TASKS_SQL, PostgresTaskRepository, TaskPgPool};
