//! Infrastructure layer - store and HTTP adapters

pub mod adapters;
pub mod http;
