//! Shared wiring for the end-to-end tests: in-memory SQLite + fixed clock
#![allow(dead_code)] // each test target compiles its own copy and uses a subset

use std::sync::Arc;

use chrono::NaiveDate;

use healthpet_core::application::{AnimalService, ProfileService, VaccinationService};
use healthpet_core::port::id_provider::UuidProvider;
use healthpet_core::port::Clock;
use healthpet_infra_sqlite::{
    create_pool, run_migrations, SqliteAnimalStore, SqliteProfileStore, SqliteVaccinationStore,
};

/// Every run of a test observes this same date
pub const TODAY: (i32, u32, u32) = (2024, 3, 15);

pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }

    fn now_millis(&self) -> i64 {
        1_700_000_000_000
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn today() -> NaiveDate {
    date(TODAY.0, TODAY.1, TODAY.2)
}

pub struct TestContext {
    pub animals: AnimalService,
    pub vaccines: VaccinationService,
    pub profiles: ProfileService,
}

/// Wire the full service stack over a fresh in-memory database
pub async fn setup() -> TestContext {
    let pool = create_pool("sqlite::memory:").await.unwrap();
    run_migrations(&pool).await.unwrap();

    let clock = Arc::new(FixedClock(today()));
    let id_provider = Arc::new(UuidProvider);
    let animal_store = Arc::new(SqliteAnimalStore::new(pool.clone()));
    let vaccination_store = Arc::new(SqliteVaccinationStore::new(pool.clone()));
    let profile_store = Arc::new(SqliteProfileStore::new(pool));

    TestContext {
        animals: AnimalService::new(
            animal_store.clone(),
            id_provider.clone(),
            clock.clone(),
        ),
        vaccines: VaccinationService::new(
            vaccination_store,
            animal_store.clone(),
            id_provider.clone(),
            clock.clone(),
        ),
        profiles: ProfileService::new(profile_store, animal_store, id_provider, clock),
    }
}
