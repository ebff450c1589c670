// Animal Store Port (Interface)

use crate::domain::{Animal, Species};
use crate::error::Result;
use async_trait::async_trait;

/// Repository interface for Animal persistence.
///
/// Deleting an animal cascades to its vaccination records and medical
/// profile; that is the adapter's responsibility, not the caller's.
#[async_trait]
pub trait AnimalStore: Send + Sync {
    /// Insert a new animal
    async fn insert(&self, animal: &Animal) -> Result<()>;

    /// Find animal by ID
    async fn find_by_id(&self, id: &str) -> Result<Option<Animal>>;

    /// All animals, ordered by name ascending
    async fn find_all(&self) -> Result<Vec<Animal>>;

    /// Update an existing animal
    async fn update(&self, animal: &Animal) -> Result<()>;

    /// Delete by ID (cascades to records and profile)
    async fn delete_by_id(&self, id: &str) -> Result<()>;

    async fn exists_by_id(&self, id: &str) -> Result<bool>;

    /// Case-insensitive exact name match
    async fn exists_by_name(&self, name: &str) -> Result<bool>;

    /// Case-insensitive partial name match
    async fn search_by_name(&self, fragment: &str) -> Result<Vec<Animal>>;

    /// Case-insensitive partial owner-name match
    async fn find_by_owner(&self, fragment: &str) -> Result<Vec<Animal>>;

    async fn find_by_species(&self, species: Species) -> Result<Vec<Animal>>;

    /// Total number of registered animals
    async fn count(&self) -> Result<i64>;
}
