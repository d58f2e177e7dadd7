use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{CarRepository, RepositoryError};
use crate::models::{Car, CarFields};

/// Process-local car store, used in tests and local runs without a database.
#[derive(Default)]
pub struct InMemoryCarRepository {
    cars: RwLock<HashMap<Uuid, Car>>,
}

impl InMemoryCarRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CarRepository for InMemoryCarRepository {
    async fn insert(&self, car: &Car) -> Result<(), RepositoryError> {
        self.cars.write().await.insert(car.id, car.clone());
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Car>, RepositoryError> {
        Ok(self.cars.read().await.values().cloned().collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Car>, RepositoryError> {
        Ok(self.cars.read().await.get(&id).cloned())
    }

    async fn update(&self, id: Uuid, fields: &CarFields) -> Result<u64, RepositoryError> {
        let mut cars = self.cars.write().await;
        match cars.get_mut(&id) {
            Some(car) => {
                *car = Car::new(id, fields.clone());
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<u64, RepositoryError> {
        Ok(self.cars.write().await.remove(&id).map_or(0, |_| 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corolla(year: i64) -> CarFields {
        CarFields {
            make: "Toyota".to_string(),
            model: "Corolla".to_string(),
            year,
        }
    }

    #[tokio::test]
    async fn insert_then_find_by_id_returns_same_car() {
        let repo = InMemoryCarRepository::new();
        let car = Car::create(corolla(2020));

        repo.insert(&car).await.unwrap();

        assert_eq!(repo.find_by_id(car.id).await.unwrap(), Some(car));
    }

    #[tokio::test]
    async fn find_all_on_empty_store_is_empty() {
        let repo = InMemoryCarRepository::new();
        assert!(repo.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_replaces_fields_and_reports_match() {
        let repo = InMemoryCarRepository::new();
        let car = Car::create(corolla(2020));
        repo.insert(&car).await.unwrap();

        let matched = repo.update(car.id, &corolla(2021)).await.unwrap();

        assert_eq!(matched, 1);
        let stored = repo.find_by_id(car.id).await.unwrap().unwrap();
        assert_eq!(stored.year, 2021);
        assert_eq!(stored.id, car.id);
    }

    #[tokio::test]
    async fn update_and_delete_of_unknown_id_match_nothing() {
        let repo = InMemoryCarRepository::new();
        let id = Uuid::new_v4();

        assert_eq!(repo.update(id, &corolla(2021)).await.unwrap(), 0);
        assert_eq!(repo.delete(id).await.unwrap(), 0);
        assert!(repo.find_by_id(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_removes_car() {
        let repo = InMemoryCarRepository::new();
        let car = Car::create(corolla(2020));
        repo.insert(&car).await.unwrap();

        assert_eq!(repo.delete(car.id).await.unwrap(), 1);
        assert!(repo.find_by_id(car.id).await.unwrap().is_none());
    }
}
