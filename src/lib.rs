//! Tasktrack: a personal task-tracking backend.
//!
//! The crate owns the task lifecycle (create, update, complete, soft-delete,
//! restore, hard-delete and their batch variants) and a filtered, paginated
//! query engine over the task collection.
//!
//! # Architecture
//!
//! Tasktrack follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for storage
//! - **Adapters**: In-memory and `PostgreSQL` implementations of the ports
//!
//! # Modules
//!
//! - [`task`]: Task lifecycle and query engine
//! - [`http`]: axum adapter exposing the task API
//! - [`config`]: Environment-driven server configuration
//! - [`telemetry`]: Tracing subscriber set-up

pub mod config;
pub mod http;
pub mod task;
pub mod telemetry;
