//! Task lifecycle and query engine.
//!
//! Tasks move through precondition-gated transitions (pending to completed,
//! active to soft-deleted and back, and finally hard deletion). Listing
//! composes optional filters into a conjunction over active tasks with a
//! stable, paginated ordering. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]
//! - External representation in [`mapping`]

pub mod adapters;
pub mod domain;
pub mod mapping;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
