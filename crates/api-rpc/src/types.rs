//! RPC Request/Response Types
//!
//! Method parameters and results. Entity payloads reuse the core request
//! types so the RPC surface cannot drift from the service contracts.

use healthpet_core::application::{AnimalUpdate, ProfileUpdate, VaccinationUpdate};
use serde::{Deserialize, Serialize};

/// animal.get.v1 / animal.remove.v1 / animal.card.v1 / profile.get.v1
/// and the per-animal vaccine queries
#[derive(Debug, Deserialize)]
pub struct AnimalIdRequest {
    pub animal_id: String,
}

/// vaccine.get.v1 / vaccine.detail.v1 / vaccine.remove.v1 / vaccine.complete.v1
#[derive(Debug, Deserialize)]
pub struct RecordIdRequest {
    pub record_id: String,
}

/// animal.update.v1
#[derive(Debug, Deserialize)]
pub struct UpdateAnimalRequest {
    pub animal_id: String,
    pub update: AnimalUpdate,
}

/// vaccine.update.v1
#[derive(Debug, Deserialize)]
pub struct UpdateVaccinationRequest {
    pub record_id: String,
    pub update: VaccinationUpdate,
}

/// profile.upsert.v1
#[derive(Debug, Deserialize)]
pub struct UpsertProfileRequest {
    pub animal_id: String,
    pub update: ProfileUpdate,
}

/// animal.search.v1 - exactly one criterion is honored (name, then owner,
/// then species)
#[derive(Debug, Deserialize)]
pub struct SearchAnimalsRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub species: Option<String>,
}

/// vaccine.due_soon.v1 / vaccine.upcoming.v1
#[derive(Debug, Deserialize)]
pub struct WindowRequest {
    #[serde(default)]
    pub window_days: Option<i64>,
}

/// vaccine.search.v1
#[derive(Debug, Deserialize)]
pub struct VaccineNameRequest {
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RemovedResponse {
    pub removed: bool,
}

/// animal.card.v1
#[derive(Debug, Clone, Serialize)]
pub struct CardResponse {
    pub animal_id: String,
    pub card: String,
}

/// vaccine.count.v1
#[derive(Debug, Clone, Serialize)]
pub struct CountResponse {
    pub animal_id: String,
    pub count: i64,
}

/// vaccine.alerts.v1
#[derive(Debug, Clone, Serialize)]
pub struct AlertsResponse {
    pub animal_id: String,
    pub alerts: Vec<String>,
}
