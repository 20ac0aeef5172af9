use std::sync::Arc;

use vitrine_engine::OrderingEngine;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// The ordering engine, the only component that mutates slides.
    pub engine: Arc<OrderingEngine>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
