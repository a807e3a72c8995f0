//! In-memory adapter implementations for testing.
//!
//! These adapters provide simple, thread-safe implementations suitable for
//! unit testing and local runs without database dependencies.

mod task;

pub use task::InMemoryTaskRepository;
