// Medical Profile Service

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::MedicalProfile;
use crate::error::{AppError, Result};
use crate::port::{AnimalStore, Clock, IdProvider, ProfileStore};

/// Closed update-request type for medical profiles
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default)]
    pub weight_kg: Option<f64>,
    #[serde(default)]
    pub height_cm: Option<f64>,
    #[serde(default)]
    pub allergies: Option<String>,
    #[serde(default)]
    pub medications: Option<String>,
    #[serde(default)]
    pub pre_existing_conditions: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Medical Profile Service (one profile per animal, created on first write)
pub struct ProfileService {
    profiles: Arc<dyn ProfileStore>,
    animals: Arc<dyn AnimalStore>,
    id_provider: Arc<dyn IdProvider>,
    clock: Arc<dyn Clock>,
}

impl ProfileService {
    pub fn new(
        profiles: Arc<dyn ProfileStore>,
        animals: Arc<dyn AnimalStore>,
        id_provider: Arc<dyn IdProvider>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            profiles,
            animals,
            id_provider,
            clock,
        }
    }

    async fn ensure_animal(&self, animal_id: &str) -> Result<()> {
        if self.animals.exists_by_id(animal_id).await? {
            Ok(())
        } else {
            Err(AppError::NotFound(format!(
                "Animal {} not found",
                animal_id
            )))
        }
    }

    /// Create or update the animal's profile; `updated_at` is stamped on
    /// every write with the injected clock.
    pub async fn upsert(&self, animal_id: &str, update: ProfileUpdate) -> Result<MedicalProfile> {
        self.ensure_animal(animal_id).await?;

        let now = self.clock.now_millis();
        let existing = self.profiles.find_by_animal(animal_id).await?;
        let is_new = existing.is_none();

        let mut profile = existing.unwrap_or_else(|| {
            MedicalProfile::new(self.id_provider.generate_id(), now, animal_id)
        });

        if let Some(weight_kg) = update.weight_kg {
            profile.weight_kg = Some(weight_kg);
        }
        if let Some(height_cm) = update.height_cm {
            profile.height_cm = Some(height_cm);
        }
        if let Some(allergies) = update.allergies {
            profile.allergies = Some(allergies);
        }
        if let Some(medications) = update.medications {
            profile.medications = Some(medications);
        }
        if let Some(conditions) = update.pre_existing_conditions {
            profile.pre_existing_conditions = Some(conditions);
        }
        if let Some(notes) = update.notes {
            profile.notes = Some(notes);
        }
        profile.updated_at = now;

        if is_new {
            self.profiles.insert(&profile).await?;
            info!(animal_id = %animal_id, "Medical profile created");
        } else {
            self.profiles.update(&profile).await?;
        }

        Ok(profile)
    }

    pub async fn get(&self, animal_id: &str) -> Result<MedicalProfile> {
        self.ensure_animal(animal_id).await?;
        self.profiles
            .find_by_animal(animal_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("No medical profile for animal {}", animal_id))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::{
        FixedClock, InMemoryAnimalStore, InMemoryProfileStore, SeqIdProvider,
    };
    use crate::domain::{Animal, SpeciesTraits};
    use chrono::NaiveDate;

    fn setup() -> (ProfileService, String) {
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let animal = Animal::new_test("Luna", 2.0, SpeciesTraits::Cat {
            coat: Some("long".to_string()),
            temperament: None,
        });
        let animal_id = animal.id.clone();
        let service = ProfileService::new(
            Arc::new(InMemoryProfileStore::default()),
            Arc::new(InMemoryAnimalStore::with(vec![animal])),
            Arc::new(SeqIdProvider::new()),
            Arc::new(FixedClock::at(today)),
        );
        (service, animal_id)
    }

    #[tokio::test]
    async fn first_upsert_creates_profile() {
        let (service, animal_id) = setup();

        let profile = service
            .upsert(
                &animal_id,
                ProfileUpdate {
                    weight_kg: Some(4.2),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(profile.weight_kg, Some(4.2));
        assert_eq!(profile.animal_id, animal_id);
        assert_eq!(service.get(&animal_id).await.unwrap(), profile);
    }

    #[tokio::test]
    async fn second_upsert_merges_fields() {
        let (service, animal_id) = setup();

        service
            .upsert(
                &animal_id,
                ProfileUpdate {
                    weight_kg: Some(4.2),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let profile = service
            .upsert(
                &animal_id,
                ProfileUpdate {
                    allergies: Some("pollen".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(profile.weight_kg, Some(4.2));
        assert_eq!(profile.allergies, Some("pollen".to_string()));
    }

    #[tokio::test]
    async fn get_without_profile_is_not_found() {
        let (service, animal_id) = setup();
        assert!(matches!(
            service.get(&animal_id).await.unwrap_err(),
            AppError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn unknown_animal_is_not_found() {
        let (service, _) = setup();
        assert!(matches!(
            service.upsert("ghost", ProfileUpdate::default()).await.unwrap_err(),
            AppError::NotFound(_)
        ));
    }
}
