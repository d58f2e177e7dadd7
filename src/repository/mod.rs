pub mod errors;
pub mod memory;
pub mod postgres;

pub use errors::RepositoryError;
pub use memory::InMemoryCarRepository;
pub use postgres::PgCarRepository;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{Car, CarFields};

/// Shared handle to the car collection.
///
/// Implementations must be safe to call from many requests at once; handlers
/// add no locking of their own.
#[async_trait]
pub trait CarRepository: Send + Sync + 'static {
    async fn insert(&self, car: &Car) -> Result<(), RepositoryError>;

    /// Returns every stored car. A record that fails to decode fails the
    /// whole call.
    async fn find_all(&self) -> Result<Vec<Car>, RepositoryError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Car>, RepositoryError>;

    /// Overwrites the stored fields of the car with `id`.
    /// Returns the number of records matched, which may be zero.
    async fn update(&self, id: Uuid, fields: &CarFields) -> Result<u64, RepositoryError>;

    /// Removes the car with `id`. Returns the number of records removed.
    async fn delete(&self, id: Uuid) -> Result<u64, RepositoryError>;

    /// Checks that the backing store is reachable.
    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}
