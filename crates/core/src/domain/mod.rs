// Domain Layer - Pure business logic and entities

pub mod age;
pub mod animal;
pub mod error;
pub mod profile;
pub mod vaccination;

// Re-exports
pub use animal::{Animal, AnimalId, Species, SpeciesTraits};
pub use error::DomainError;
pub use profile::MedicalProfile;
pub use vaccination::{
    Classification, RecordId, VaccinationRecord, VaccinationStatus,
    DEFAULT_DUE_SOON_WINDOW_DAYS, DEFAULT_UPCOMING_WINDOW_DAYS,
};
