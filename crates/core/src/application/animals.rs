// Animal Service - registration, search and record-card use cases

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::animal::validate_age;
use crate::domain::{Animal, DomainError, Species, SpeciesTraits};
use crate::error::{AppError, Result};
use crate::port::{AnimalStore, Clock, IdProvider};

/// Request to register a new animal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterAnimalRequest {
    pub name: String,
    #[serde(default)]
    pub breed: Option<String>,
    pub age_years: f64,
    pub owner_name: String,
    pub owner_phone: String,
    pub traits: SpeciesTraits,
}

/// Closed update-request type per entity kind: the species tag itself is
/// immutable, so a traits payload here must carry the same tag.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnimalUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub breed: Option<String>,
    #[serde(default)]
    pub age_years: Option<f64>,
    #[serde(default)]
    pub owner_name: Option<String>,
    #[serde(default)]
    pub owner_phone: Option<String>,
    #[serde(default)]
    pub traits: Option<SpeciesTraits>,
}

/// Animal Service
pub struct AnimalService {
    animals: Arc<dyn AnimalStore>,
    id_provider: Arc<dyn IdProvider>,
    clock: Arc<dyn Clock>,
}

impl AnimalService {
    pub fn new(
        animals: Arc<dyn AnimalStore>,
        id_provider: Arc<dyn IdProvider>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            animals,
            id_provider,
            clock,
        }
    }

    /// Register a new animal
    pub async fn register(&self, req: RegisterAnimalRequest) -> Result<Animal> {
        require_non_blank(&req.name, "name")?;
        require_non_blank(&req.owner_name, "owner name")?;
        require_non_blank(&req.owner_phone, "owner phone")?;
        validate_age(req.age_years).map_err(AppError::Domain)?;

        if self.animals.exists_by_name(&req.name).await? {
            return Err(AppError::Conflict(format!(
                "An animal named {} is already registered",
                req.name
            )));
        }

        let animal = Animal::new(
            self.id_provider.generate_id(),
            self.clock.now_millis(),
            req.name,
            req.breed,
            req.age_years,
            req.owner_name,
            req.owner_phone,
            req.traits,
        );

        self.animals.insert(&animal).await?;

        info!(
            animal_id = %animal.id,
            species = %animal.species(),
            "Animal registered"
        );

        Ok(animal)
    }

    pub async fn get(&self, id: &str) -> Result<Animal> {
        self.animals
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Animal {} not found", id)))
    }

    /// All animals, name ascending
    pub async fn list(&self) -> Result<Vec<Animal>> {
        self.animals.find_all().await
    }

    pub async fn search_by_name(&self, fragment: &str) -> Result<Vec<Animal>> {
        self.animals.search_by_name(fragment).await
    }

    pub async fn search_by_owner(&self, fragment: &str) -> Result<Vec<Animal>> {
        self.animals.find_by_owner(fragment).await
    }

    pub async fn list_by_species(&self, species: Species) -> Result<Vec<Animal>> {
        self.animals.find_by_species(species).await
    }

    pub async fn count(&self) -> Result<i64> {
        self.animals.count().await
    }

    /// Apply a partial correction to an animal
    pub async fn update(&self, id: &str, update: AnimalUpdate) -> Result<Animal> {
        let mut animal = self.get(id).await?;

        if let Some(name) = update.name {
            require_non_blank(&name, "name")?;
            animal.name = name;
        }
        if let Some(breed) = update.breed {
            animal.breed = Some(breed);
        }
        if let Some(age_years) = update.age_years {
            validate_age(age_years).map_err(AppError::Domain)?;
            animal.age_years = age_years;
        }
        if let Some(owner_name) = update.owner_name {
            require_non_blank(&owner_name, "owner name")?;
            animal.owner_name = owner_name;
        }
        if let Some(owner_phone) = update.owner_phone {
            require_non_blank(&owner_phone, "owner phone")?;
            animal.owner_phone = owner_phone;
        }
        if let Some(traits) = update.traits {
            if traits.species() != animal.species() {
                return Err(AppError::Domain(DomainError::SpeciesMismatch {
                    species: animal.species().to_string(),
                    traits: traits.species().to_string(),
                }));
            }
            animal.traits = traits;
        }

        self.animals.update(&animal).await?;
        Ok(animal)
    }

    /// Remove an animal. The store cascades the delete to its vaccination
    /// records and medical profile.
    pub async fn remove(&self, id: &str) -> Result<()> {
        if !self.animals.exists_by_id(id).await? {
            return Err(AppError::NotFound(format!("Animal {} not found", id)));
        }
        self.animals.delete_by_id(id).await?;

        info!(animal_id = %id, "Animal removed");
        Ok(())
    }

    /// Full record card including human-equivalent age and care guidance
    pub async fn summary_card(&self, id: &str) -> Result<String> {
        Ok(self.get(id).await?.summary_card())
    }
}

fn require_non_blank(value: &str, field: &str) -> Result<()> {
    if value.trim().is_empty() {
        Err(AppError::Validation(format!("{} must not be blank", field)))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::{FixedClock, InMemoryAnimalStore, SeqIdProvider};
    use chrono::NaiveDate;

    fn service() -> AnimalService {
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        AnimalService::new(
            Arc::new(InMemoryAnimalStore::default()),
            Arc::new(SeqIdProvider::new()),
            Arc::new(FixedClock::at(today)),
        )
    }

    fn dog_request(name: &str) -> RegisterAnimalRequest {
        RegisterAnimalRequest {
            name: name.to_string(),
            breed: Some("Labrador".to_string()),
            age_years: 3.0,
            owner_name: "Ana Silva".to_string(),
            owner_phone: "555-1234".to_string(),
            traits: SpeciesTraits::Dog {
                size: Some("large".to_string()),
            },
        }
    }

    #[tokio::test]
    async fn register_and_fetch_roundtrip() {
        let service = service();
        let animal = service.register(dog_request("Rex")).await.unwrap();

        let fetched = service.get(&animal.id).await.unwrap();
        assert_eq!(fetched, animal);
        assert_eq!(fetched.species(), Species::Dog);
    }

    #[tokio::test]
    async fn register_rejects_out_of_range_age() {
        let service = service();

        let mut req = dog_request("Rex");
        req.age_years = 0.0;
        assert!(matches!(
            service.register(req).await.unwrap_err(),
            AppError::Domain(DomainError::AgeOutOfRange(_))
        ));

        let mut req = dog_request("Rex");
        req.age_years = 51.0;
        assert!(service.register(req).await.is_err());
    }

    #[tokio::test]
    async fn duplicate_name_is_a_conflict() {
        let service = service();
        service.register(dog_request("Rex")).await.unwrap();

        let err = service.register(dog_request("rex")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn update_rejects_traits_of_another_species() {
        let service = service();
        let animal = service.register(dog_request("Rex")).await.unwrap();

        let err = service
            .update(
                &animal.id,
                AnimalUpdate {
                    traits: Some(SpeciesTraits::Cat {
                        coat: None,
                        temperament: None,
                    }),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            AppError::Domain(DomainError::SpeciesMismatch { .. })
        ));
    }

    #[tokio::test]
    async fn update_revalidates_age() {
        let service = service();
        let animal = service.register(dog_request("Rex")).await.unwrap();

        let err = service
            .update(
                &animal.id,
                AnimalUpdate {
                    age_years: Some(-2.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Domain(_)));
    }

    #[tokio::test]
    async fn remove_unknown_animal_is_not_found() {
        let service = service();
        assert!(matches!(
            service.remove("ghost").await.unwrap_err(),
            AppError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn summary_card_carries_care_guidance() {
        let service = service();
        let animal = service.register(dog_request("Rex")).await.unwrap();

        let card = service.summary_card(&animal.id).await.unwrap();
        assert!(card.contains("Rex"));
        assert!(card.contains("Human-equivalent age: 28 years"));
        assert!(card.contains("1.5 to 2 hours"));
    }
}
