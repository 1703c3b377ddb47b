//! Command and query handlers implementing the CQRS pattern
//!
//! Handlers are generic over the repository ports so tests can substitute
//! mock stores.

pub mod command_handlers;
pub mod query_handlers;

pub use command_handlers::{
    CatalogCommandHandler, ProjectCommandHandler, SoilFormulaCommandHandler,
    SoilTypeCommandHandler,
};
pub use query_handlers::{CatalogQueryHandler, ProjectQueryHandler, SoilFormulaQueryHandler};

use crate::application::ApplicationResult;
use async_trait::async_trait;

/// Async handler for one command type
#[async_trait]
pub trait CommandHandler<C>: Send + Sync {
    /// The response type for this command
    type Response: Send;

    /// Execute the command against the repositories
    async fn handle(&self, command: C) -> ApplicationResult<Self::Response>;
}

/// Async handler for one query type
#[async_trait]
pub trait QueryHandler<Q>: Send + Sync {
    /// The response type for this query
    type Response: Send;

    /// Execute the query against the repositories
    async fn handle(&self, query: Q) -> ApplicationResult<Self::Response>;
}
