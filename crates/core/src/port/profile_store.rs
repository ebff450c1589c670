// Medical Profile Store Port (Interface)

use crate::domain::MedicalProfile;
use crate::error::Result;
use async_trait::async_trait;

/// Repository interface for MedicalProfile persistence (one profile per animal)
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Insert a new profile
    async fn insert(&self, profile: &MedicalProfile) -> Result<()>;

    /// Find the profile of an animal
    async fn find_by_animal(&self, animal_id: &str) -> Result<Option<MedicalProfile>>;

    /// Update an existing profile
    async fn update(&self, profile: &MedicalProfile) -> Result<()>;
}
