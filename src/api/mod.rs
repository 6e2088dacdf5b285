//! HTTP binding of the simulator.

pub mod dto;
pub mod error;
pub mod handlers;

use std::sync::Arc;

use axum::routing::post;
use axum::Router;

use crate::simulator::Simulate;

pub const SIMULATE_PATH: &str = "/load-simulator";

/// shared, immutable handler state
#[derive(Clone)]
pub struct AppState {
    pub simulator: Arc<dyn Simulate>,
}

impl AppState {
    pub fn new(simulator: impl Simulate + 'static) -> Self {
        Self {
            simulator: Arc::new(simulator),
        }
    }
}

/// router exposing `POST /load-simulator`
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(SIMULATE_PATH, post(handlers::simulate))
        .with_state(state)
}
