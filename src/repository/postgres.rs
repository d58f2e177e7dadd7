use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use super::{CarRepository, RepositoryError};
use crate::constants::CARS_COLLECTION;
use crate::models::{Car, CarFields};

/// Stores each car as a JSONB document in the [`CARS_COLLECTION`] table.
#[derive(Clone)]
pub struct PgCarRepository {
    pool: PgPool,
}

impl PgCarRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn decode(id: Uuid, document: Value) -> Result<Car, RepositoryError> {
        let fields: CarFields = serde_json::from_value(document)?;
        Ok(Car::new(id, fields))
    }
}

#[async_trait]
impl CarRepository for PgCarRepository {
    async fn insert(&self, car: &Car) -> Result<(), RepositoryError> {
        let document = serde_json::to_value(car.fields())?;

        let query = format!("INSERT INTO {} (id, document) VALUES ($1, $2)", CARS_COLLECTION);

        sqlx::query(&query)
            .bind(car.id)
            .bind(&document)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Car>, RepositoryError> {
        let query = format!("SELECT id, document FROM {}", CARS_COLLECTION);

        let rows = sqlx::query_as::<_, (Uuid, Value)>(&query)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter()
            .map(|(id, document)| Self::decode(id, document))
            .collect()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Car>, RepositoryError> {
        let query = format!("SELECT id, document FROM {} WHERE id = $1", CARS_COLLECTION);

        let row = sqlx::query_as::<_, (Uuid, Value)>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|(id, document)| Self::decode(id, document))
            .transpose()
    }

    async fn update(&self, id: Uuid, fields: &CarFields) -> Result<u64, RepositoryError> {
        let document = serde_json::to_value(fields)?;

        // Merge keeps any extra keys already in the document, like a $set.
        let query = format!(
            "UPDATE {} SET document = document || $1 WHERE id = $2",
            CARS_COLLECTION
        );

        let result = sqlx::query(&query)
            .bind(&document)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn delete(&self, id: Uuid) -> Result<u64, RepositoryError> {
        let query = format!("DELETE FROM {} WHERE id = $1", CARS_COLLECTION);

        let result = sqlx::query(&query)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
