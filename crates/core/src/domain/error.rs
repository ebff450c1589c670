// Domain Error Types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Age out of range: {0} (expected 0 < age <= 50)")]
    AgeOutOfRange(f64),

    #[error("Species traits do not match species tag: {species} vs {traits}")]
    SpeciesMismatch { species: String, traits: String },

    #[error("Animal not found: {0}")]
    AnimalNotFound(String),

    #[error("Vaccination record not found: {0}")]
    RecordNotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, DomainError>;
