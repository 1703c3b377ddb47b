//! HTTP adapter

pub mod axum_adapter;

pub use axum_adapter::{ApiError, ApiState, Store, create_api_router};
