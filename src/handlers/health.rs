use axum::{extract::State, http::StatusCode, response::Json, routing::get, Router};
use serde_json::{json, Value};

use super::car::CarState;
use crate::constants::API_NAME;
use crate::repository::CarRepository;

pub fn router() -> Router<CarState> {
    Router::new().route("/health", get(health_check))
}

/// Reports 503 while the car store cannot be reached.
async fn health_check(State(cars): State<CarState>) -> (StatusCode, Json<Value>) {
    match cars.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "status": "healthy", "message": "Car API is healthy" })),
        ),
        Err(e) => {
            tracing::error!("{} Health check failed: {}", API_NAME, e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "unhealthy", "message": "Car store is unreachable" })),
            )
        }
    }
}
