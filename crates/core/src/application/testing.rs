// In-memory test doubles shared by the service test modules

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{Animal, MedicalProfile, Species, VaccinationRecord};
use crate::error::Result;
use crate::port::{AnimalStore, Clock, IdProvider, ProfileStore, VaccinationStore};

pub struct FixedClock {
    pub today: NaiveDate,
    pub millis: i64,
}

impl FixedClock {
    pub fn at(today: NaiveDate) -> Self {
        Self {
            today,
            millis: 1_000_000,
        }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.today
    }

    fn now_millis(&self) -> i64 {
        self.millis
    }
}

pub struct SeqIdProvider(AtomicU64);

impl SeqIdProvider {
    pub fn new() -> Self {
        Self(AtomicU64::new(1))
    }
}

impl IdProvider for SeqIdProvider {
    fn generate_id(&self) -> String {
        format!("id-{}", self.0.fetch_add(1, Ordering::SeqCst))
    }
}

#[derive(Default)]
pub struct InMemoryAnimalStore {
    items: Mutex<HashMap<String, Animal>>,
}

impl InMemoryAnimalStore {
    pub fn with(animals: Vec<Animal>) -> Self {
        let store = Self::default();
        {
            let mut items = store.items.lock().unwrap();
            for animal in animals {
                items.insert(animal.id.clone(), animal);
            }
        }
        store
    }
}

#[async_trait]
impl AnimalStore for InMemoryAnimalStore {
    async fn insert(&self, animal: &Animal) -> Result<()> {
        self.items
            .lock()
            .unwrap()
            .insert(animal.id.clone(), animal.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Animal>> {
        Ok(self.items.lock().unwrap().get(id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Animal>> {
        let mut all: Vec<Animal> = self.items.lock().unwrap().values().cloned().collect();
        all.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        Ok(all)
    }

    async fn update(&self, animal: &Animal) -> Result<()> {
        self.items
            .lock()
            .unwrap()
            .insert(animal.id.clone(), animal.clone());
        Ok(())
    }

    async fn delete_by_id(&self, id: &str) -> Result<()> {
        self.items.lock().unwrap().remove(id);
        Ok(())
    }

    async fn exists_by_id(&self, id: &str) -> Result<bool> {
        Ok(self.items.lock().unwrap().contains_key(id))
    }

    async fn exists_by_name(&self, name: &str) -> Result<bool> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .values()
            .any(|a| a.name.eq_ignore_ascii_case(name)))
    }

    async fn search_by_name(&self, fragment: &str) -> Result<Vec<Animal>> {
        let fragment = fragment.to_lowercase();
        Ok(self
            .items
            .lock()
            .unwrap()
            .values()
            .filter(|a| a.name.to_lowercase().contains(&fragment))
            .cloned()
            .collect())
    }

    async fn find_by_owner(&self, fragment: &str) -> Result<Vec<Animal>> {
        let fragment = fragment.to_lowercase();
        Ok(self
            .items
            .lock()
            .unwrap()
            .values()
            .filter(|a| a.owner_name.to_lowercase().contains(&fragment))
            .cloned()
            .collect())
    }

    async fn find_by_species(&self, species: Species) -> Result<Vec<Animal>> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .values()
            .filter(|a| a.species() == species)
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<i64> {
        Ok(self.items.lock().unwrap().len() as i64)
    }
}

#[derive(Default)]
pub struct InMemoryVaccinationStore {
    items: Mutex<HashMap<String, VaccinationRecord>>,
}

impl InMemoryVaccinationStore {
    pub fn with(records: Vec<VaccinationRecord>) -> Self {
        let store = Self::default();
        {
            let mut items = store.items.lock().unwrap();
            for record in records {
                items.insert(record.id.clone(), record);
            }
        }
        store
    }
}

#[async_trait]
impl VaccinationStore for InMemoryVaccinationStore {
    async fn insert(&self, record: &VaccinationRecord) -> Result<()> {
        self.items
            .lock()
            .unwrap()
            .insert(record.id.clone(), record.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<VaccinationRecord>> {
        Ok(self.items.lock().unwrap().get(id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<VaccinationRecord>> {
        Ok(self.items.lock().unwrap().values().cloned().collect())
    }

    async fn update(&self, record: &VaccinationRecord) -> Result<()> {
        self.items
            .lock()
            .unwrap()
            .insert(record.id.clone(), record.clone());
        Ok(())
    }

    async fn delete_by_id(&self, id: &str) -> Result<()> {
        self.items.lock().unwrap().remove(id);
        Ok(())
    }

    async fn exists_by_id(&self, id: &str) -> Result<bool> {
        Ok(self.items.lock().unwrap().contains_key(id))
    }

    async fn find_by_animal(&self, animal_id: &str) -> Result<Vec<VaccinationRecord>> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .values()
            .filter(|r| r.animal_id == animal_id)
            .cloned()
            .collect())
    }

    async fn find_incomplete(&self) -> Result<Vec<VaccinationRecord>> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .values()
            .filter(|r| !r.completed)
            .cloned()
            .collect())
    }

    async fn find_incomplete_by_animal(&self, animal_id: &str) -> Result<Vec<VaccinationRecord>> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .values()
            .filter(|r| r.animal_id == animal_id && !r.completed)
            .cloned()
            .collect())
    }

    async fn count_by_animal(&self, animal_id: &str) -> Result<i64> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .values()
            .filter(|r| r.animal_id == animal_id)
            .count() as i64)
    }

    async fn find_by_vaccine_name(&self, fragment: &str) -> Result<Vec<VaccinationRecord>> {
        let fragment = fragment.to_lowercase();
        Ok(self
            .items
            .lock()
            .unwrap()
            .values()
            .filter(|r| r.vaccine_name.to_lowercase().contains(&fragment))
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct InMemoryProfileStore {
    items: Mutex<HashMap<String, MedicalProfile>>, // keyed by animal_id
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn insert(&self, profile: &MedicalProfile) -> Result<()> {
        self.items
            .lock()
            .unwrap()
            .insert(profile.animal_id.clone(), profile.clone());
        Ok(())
    }

    async fn find_by_animal(&self, animal_id: &str) -> Result<Option<MedicalProfile>> {
        Ok(self.items.lock().unwrap().get(animal_id).cloned())
    }

    async fn update(&self, profile: &MedicalProfile) -> Result<()> {
        self.items
            .lock()
            .unwrap()
            .insert(profile.animal_id.clone(), profile.clone());
        Ok(())
    }
}
