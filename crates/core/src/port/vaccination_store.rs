// Vaccination Store Port (Interface)

use crate::domain::VaccinationRecord;
use crate::error::Result;
use async_trait::async_trait;

/// Repository interface for VaccinationRecord persistence
#[async_trait]
pub trait VaccinationStore: Send + Sync {
    /// Insert a new record
    async fn insert(&self, record: &VaccinationRecord) -> Result<()>;

    /// Find record by ID
    async fn find_by_id(&self, id: &str) -> Result<Option<VaccinationRecord>>;

    /// All records across all animals
    async fn find_all(&self) -> Result<Vec<VaccinationRecord>>;

    /// Update an existing record
    async fn update(&self, record: &VaccinationRecord) -> Result<()>;

    /// Delete by ID
    async fn delete_by_id(&self, id: &str) -> Result<()>;

    async fn exists_by_id(&self, id: &str) -> Result<bool>;

    /// All records of one animal
    async fn find_by_animal(&self, animal_id: &str) -> Result<Vec<VaccinationRecord>>;

    /// Records not yet marked complete, across all animals
    async fn find_incomplete(&self) -> Result<Vec<VaccinationRecord>>;

    /// Records of one animal not yet marked complete
    async fn find_incomplete_by_animal(
        &self,
        animal_id: &str,
    ) -> Result<Vec<VaccinationRecord>>;

    /// Number of records for one animal
    async fn count_by_animal(&self, animal_id: &str) -> Result<i64>;

    /// Case-insensitive partial vaccine-name match
    async fn find_by_vaccine_name(&self, fragment: &str) -> Result<Vec<VaccinationRecord>>;
}
