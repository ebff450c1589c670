// HealthPet Infrastructure - SQLite Adapter
// Implements: AnimalStore, VaccinationStore, ProfileStore

mod animal_store;
mod connection;
mod error_map;
mod migration;
mod profile_store;
mod vaccination_store;

pub use animal_store::SqliteAnimalStore;
pub use connection::create_pool;
pub use migration::run_migrations;
pub use profile_store::SqliteProfileStore;
pub use vaccination_store::SqliteVaccinationStore;

// Note: sqlx::Error conversion is handled by wrapping in helper functions
// due to Rust's orphan rules (cannot implement From<sqlx::Error> for AppError here)
