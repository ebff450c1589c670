// Medical Profile Domain Model

use serde::{Deserialize, Serialize};

use crate::domain::animal::AnimalId;

/// Medical Profile Entity (one per animal)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicalProfile {
    pub id: String,
    pub animal_id: AnimalId,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub allergies: Option<String>,
    pub medications: Option<String>,
    pub pre_existing_conditions: Option<String>,
    pub notes: Option<String>,
    pub created_at: i64, // epoch ms
    pub updated_at: i64,
}

impl MedicalProfile {
    /// Create an empty profile for an animal
    ///
    /// # Arguments
    ///
    /// * `id` - Unique profile ID (injected, not generated)
    /// * `created_at` - Creation timestamp in epoch ms (injected, not system time)
    pub fn new(id: impl Into<String>, created_at: i64, animal_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            animal_id: animal_id.into(),
            weight_kg: None,
            height_cm: None,
            allergies: None,
            medications: None,
            pre_existing_conditions: None,
            notes: None,
            created_at,
            updated_at: created_at,
        }
    }
}
