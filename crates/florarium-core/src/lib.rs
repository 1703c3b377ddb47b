//! Florarium Core - Application and Infrastructure Layers
//!
//! Builds on `florarium-domain` following Clean Architecture:
//! - **Ports**: async repository traits the application depends on
//! - **Application**: CQRS commands, queries and their handlers
//! - **Infrastructure**: the in-memory store adapter and the axum HTTP
//!   adapter exposing the catalog under `/api`

#![warn(missing_docs)]

pub mod application;
pub mod infrastructure;
pub mod ports;

pub use application::{ApplicationError, ApplicationResult};
pub use infrastructure::adapters::MemoryStore;
pub use infrastructure::http::{ApiState, Store, create_api_router};
