//! Core types and remote contracts for domain model import.
//!
//! This crate defines the persisted domain model records, the shapes reported
//! by the discovery agent, and the two async traits the rest of the workspace
//! talks to:
//!
//! - [`SchemaDiscoveryClient`] lists drivers, schemas and tables through the agent.
//! - [`DomainRepository`] loads, saves and removes domain models on the console.

mod error;
mod model;
mod repository;
mod schema;

pub use error::*;
pub use model::*;
pub use repository::*;
pub use schema::*;
