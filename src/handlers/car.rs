use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::constants::API_NAME;
use crate::error::AppError;
use crate::models::{parse_car_id, Car, CarFields};
use crate::repository::{CarRepository, RepositoryError};

pub type CarState = Arc<dyn CarRepository>;

pub fn router() -> Router<CarState> {
    Router::new()
        .route("/cars", get(list_cars).post(create_car))
        .route("/cars/:id", get(get_car).put(update_car).delete(delete_car))
}

fn car_id(raw: &str) -> Result<Uuid, AppError> {
    parse_car_id(raw).ok_or_else(|| AppError::Validation("Invalid ID format".to_string()))
}

/// Decodes a car body regardless of the request's content type.
fn car_fields(body: &[u8]) -> Result<CarFields, AppError> {
    serde_json::from_slice(body).map_err(|e| AppError::Validation(e.to_string()))
}

async fn create_car(
    State(cars): State<CarState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Car>), AppError> {
    let fields = car_fields(&body)?;
    let car = Car::create(fields);

    cars.insert(&car)
        .await
        .map_err(|e| AppError::storage("Failed to create car", e))?;

    tracing::info!("{} Created car: {}", API_NAME, car.id);
    Ok((StatusCode::CREATED, Json(car)))
}

async fn list_cars(State(cars): State<CarState>) -> Result<Json<Vec<Car>>, AppError> {
    let all = cars.find_all().await.map_err(|e| match e {
        decode @ RepositoryError::Decode(_) => {
            AppError::storage("Error decoding car", decode)
        }
        other => AppError::storage("Failed to fetch cars", other),
    })?;

    tracing::debug!("{} Listed {} cars", API_NAME, all.len());
    Ok(Json(all))
}

async fn get_car(
    State(cars): State<CarState>,
    Path(id): Path<String>,
) -> Result<Json<Car>, AppError> {
    let id = car_id(&id)?;

    cars.find_by_id(id)
        .await
        .map_err(|e| AppError::storage("Failed to fetch car", e))?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Car not found".to_string()))
}

async fn update_car(
    State(cars): State<CarState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    let id = car_id(&id)?;
    let fields = car_fields(&body)?;

    let matched = cars
        .update(id, &fields)
        .await
        .map_err(|e| AppError::storage("Failed to update car", e))?;

    // A zero match still reports success.
    if matched == 0 {
        tracing::debug!("{} Update matched no car: {}", API_NAME, id);
    } else {
        tracing::info!("{} Updated car: {}", API_NAME, id);
    }

    Ok(Json(json!({ "message": "Car updated successfully" })))
}

async fn delete_car(
    State(cars): State<CarState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let id = car_id(&id)?;

    let removed = cars
        .delete(id)
        .await
        .map_err(|e| AppError::storage("Failed to delete car", e))?;

    if removed == 0 {
        tracing::debug!("{} Delete matched no car: {}", API_NAME, id);
    } else {
        tracing::info!("{} Deleted car: {}", API_NAME, id);
    }

    Ok(Json(json!({ "message": "Car deleted successfully" })))
}
