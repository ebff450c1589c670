//! RPC Method Handlers
//!
//! Implements the business logic bridge for each JSON-RPC method.

use std::sync::Arc;

use jsonrpsee::types::ErrorObjectOwned;

use healthpet_core::application::{
    AnimalService, ProfileService, RegisterAnimalRequest, RegisterVaccinationRequest,
    VaccinationDetail, VaccinationService, VaccinationStats,
};
use healthpet_core::domain::{Animal, MedicalProfile, Species, VaccinationRecord};

use crate::error::{code, to_rpc_error};
use crate::rate_limiter::RateLimiter;
use crate::types::{
    AlertsResponse, AnimalIdRequest, CardResponse, CountResponse, RecordIdRequest,
    RemovedResponse, SearchAnimalsRequest, UpdateAnimalRequest, UpdateVaccinationRequest,
    UpsertProfileRequest, VaccineNameRequest, WindowRequest,
};

/// RPC Handler with injected services
pub struct RpcHandler {
    animals: Arc<AnimalService>,
    vaccines: Arc<VaccinationService>,
    profiles: Arc<ProfileService>,
    rate_limiter: RateLimiter,
}

impl RpcHandler {
    pub fn new(
        animals: Arc<AnimalService>,
        vaccines: Arc<VaccinationService>,
        profiles: Arc<ProfileService>,
    ) -> Self {
        // Default: 200 burst, 100 req/sec (configurable via env)
        let max_burst: u32 = std::env::var("HEALTHPET_RATE_LIMIT_BURST")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(200);

        let rate_per_sec: u32 = std::env::var("HEALTHPET_RATE_LIMIT_RATE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(100);

        Self {
            animals,
            vaccines,
            profiles,
            rate_limiter: RateLimiter::new(max_burst, rate_per_sec),
        }
    }

    /// Rate limiting on mutating methods only
    fn check_rate(&self) -> Result<(), ErrorObjectOwned> {
        if self.rate_limiter.check() {
            Ok(())
        } else {
            Err(ErrorObjectOwned::owned(
                code::THROTTLED,
                "Rate limit exceeded. Please slow down.",
                None::<()>,
            ))
        }
    }

    // ===== animal.* =====

    /// animal.register.v1
    pub async fn register_animal(
        &self,
        params: RegisterAnimalRequest,
    ) -> Result<Animal, ErrorObjectOwned> {
        self.check_rate()?;
        self.animals.register(params).await.map_err(to_rpc_error)
    }

    /// animal.get.v1
    pub async fn get_animal(&self, params: AnimalIdRequest) -> Result<Animal, ErrorObjectOwned> {
        self.animals
            .get(&params.animal_id)
            .await
            .map_err(to_rpc_error)
    }

    /// animal.list.v1
    pub async fn list_animals(&self) -> Result<Vec<Animal>, ErrorObjectOwned> {
        self.animals.list().await.map_err(to_rpc_error)
    }

    /// animal.search.v1
    pub async fn search_animals(
        &self,
        params: SearchAnimalsRequest,
    ) -> Result<Vec<Animal>, ErrorObjectOwned> {
        let result = if let Some(name) = params.name {
            self.animals.search_by_name(&name).await
        } else if let Some(owner) = params.owner {
            self.animals.search_by_owner(&owner).await
        } else if let Some(species) = params.species {
            self.animals.list_by_species(parse_species(&species)?).await
        } else {
            return Err(ErrorObjectOwned::owned(
                code::VALIDATION_ERROR,
                "one of name, owner or species is required",
                None::<()>,
            ));
        };
        result.map_err(to_rpc_error)
    }

    /// animal.update.v1
    pub async fn update_animal(
        &self,
        params: UpdateAnimalRequest,
    ) -> Result<Animal, ErrorObjectOwned> {
        self.check_rate()?;
        self.animals
            .update(&params.animal_id, params.update)
            .await
            .map_err(to_rpc_error)
    }

    /// animal.remove.v1
    pub async fn remove_animal(
        &self,
        params: AnimalIdRequest,
    ) -> Result<RemovedResponse, ErrorObjectOwned> {
        self.check_rate()?;
        self.animals
            .remove(&params.animal_id)
            .await
            .map_err(to_rpc_error)?;
        Ok(RemovedResponse { removed: true })
    }

    /// animal.card.v1
    pub async fn animal_card(
        &self,
        params: AnimalIdRequest,
    ) -> Result<CardResponse, ErrorObjectOwned> {
        let card = self
            .animals
            .summary_card(&params.animal_id)
            .await
            .map_err(to_rpc_error)?;
        Ok(CardResponse {
            animal_id: params.animal_id,
            card,
        })
    }

    // ===== profile.* =====

    /// profile.get.v1
    pub async fn get_profile(
        &self,
        params: AnimalIdRequest,
    ) -> Result<MedicalProfile, ErrorObjectOwned> {
        self.profiles
            .get(&params.animal_id)
            .await
            .map_err(to_rpc_error)
    }

    /// profile.upsert.v1
    pub async fn upsert_profile(
        &self,
        params: UpsertProfileRequest,
    ) -> Result<MedicalProfile, ErrorObjectOwned> {
        self.check_rate()?;
        self.profiles
            .upsert(&params.animal_id, params.update)
            .await
            .map_err(to_rpc_error)
    }

    // ===== vaccine.* =====

    /// vaccine.register.v1
    pub async fn register_vaccination(
        &self,
        params: RegisterVaccinationRequest,
    ) -> Result<VaccinationRecord, ErrorObjectOwned> {
        self.check_rate()?;
        self.vaccines.register(params).await.map_err(to_rpc_error)
    }

    /// vaccine.get.v1
    pub async fn get_vaccination(
        &self,
        params: RecordIdRequest,
    ) -> Result<VaccinationRecord, ErrorObjectOwned> {
        self.vaccines
            .get(&params.record_id)
            .await
            .map_err(to_rpc_error)
    }

    /// vaccine.detail.v1 - record plus classification for detail views
    pub async fn vaccination_detail(
        &self,
        params: RecordIdRequest,
    ) -> Result<VaccinationDetail, ErrorObjectOwned> {
        self.vaccines
            .detail(&params.record_id)
            .await
            .map_err(to_rpc_error)
    }

    /// vaccine.update.v1
    pub async fn update_vaccination(
        &self,
        params: UpdateVaccinationRequest,
    ) -> Result<VaccinationRecord, ErrorObjectOwned> {
        self.check_rate()?;
        self.vaccines
            .update(&params.record_id, params.update)
            .await
            .map_err(to_rpc_error)
    }

    /// vaccine.remove.v1
    pub async fn remove_vaccination(
        &self,
        params: RecordIdRequest,
    ) -> Result<RemovedResponse, ErrorObjectOwned> {
        self.check_rate()?;
        self.vaccines
            .remove(&params.record_id)
            .await
            .map_err(to_rpc_error)?;
        Ok(RemovedResponse { removed: true })
    }

    /// vaccine.complete.v1
    pub async fn complete_vaccination(
        &self,
        params: RecordIdRequest,
    ) -> Result<VaccinationRecord, ErrorObjectOwned> {
        self.check_rate()?;
        self.vaccines
            .mark_complete(&params.record_id)
            .await
            .map_err(to_rpc_error)
    }

    /// vaccine.list.v1
    pub async fn list_vaccinations(&self) -> Result<Vec<VaccinationRecord>, ErrorObjectOwned> {
        self.vaccines.list_all().await.map_err(to_rpc_error)
    }

    /// vaccine.for_animal.v1
    pub async fn vaccinations_for_animal(
        &self,
        params: AnimalIdRequest,
    ) -> Result<Vec<VaccinationRecord>, ErrorObjectOwned> {
        self.vaccines
            .list_for_animal(&params.animal_id)
            .await
            .map_err(to_rpc_error)
    }

    /// vaccine.pending.v1
    pub async fn pending_vaccinations(
        &self,
        params: AnimalIdRequest,
    ) -> Result<Vec<VaccinationRecord>, ErrorObjectOwned> {
        self.vaccines
            .list_pending(&params.animal_id)
            .await
            .map_err(to_rpc_error)
    }

    /// vaccine.overdue.v1
    pub async fn overdue_vaccinations(&self) -> Result<Vec<VaccinationRecord>, ErrorObjectOwned> {
        self.vaccines.list_overdue().await.map_err(to_rpc_error)
    }

    /// vaccine.due_soon.v1
    pub async fn due_soon_vaccinations(
        &self,
        params: WindowRequest,
    ) -> Result<Vec<VaccinationRecord>, ErrorObjectOwned> {
        self.vaccines
            .list_due_soon(params.window_days)
            .await
            .map_err(to_rpc_error)
    }

    /// vaccine.upcoming.v1
    pub async fn upcoming_vaccinations(
        &self,
        params: WindowRequest,
    ) -> Result<Vec<VaccinationRecord>, ErrorObjectOwned> {
        self.vaccines
            .list_upcoming(params.window_days)
            .await
            .map_err(to_rpc_error)
    }

    /// vaccine.stats.v1
    pub async fn vaccination_stats(
        &self,
        params: AnimalIdRequest,
    ) -> Result<VaccinationStats, ErrorObjectOwned> {
        self.vaccines
            .statistics(&params.animal_id)
            .await
            .map_err(to_rpc_error)
    }

    /// vaccine.next.v1
    pub async fn next_vaccination(
        &self,
        params: AnimalIdRequest,
    ) -> Result<Option<VaccinationRecord>, ErrorObjectOwned> {
        self.vaccines
            .next_upcoming(&params.animal_id)
            .await
            .map_err(to_rpc_error)
    }

    /// vaccine.alerts.v1
    pub async fn vaccination_alerts(
        &self,
        params: AnimalIdRequest,
    ) -> Result<AlertsResponse, ErrorObjectOwned> {
        let alerts = self
            .vaccines
            .alerts_for_animal(&params.animal_id)
            .await
            .map_err(to_rpc_error)?;
        Ok(AlertsResponse {
            animal_id: params.animal_id,
            alerts,
        })
    }

    /// vaccine.count.v1
    pub async fn vaccination_count(
        &self,
        params: AnimalIdRequest,
    ) -> Result<CountResponse, ErrorObjectOwned> {
        let count = self
            .vaccines
            .count_for_animal(&params.animal_id)
            .await
            .map_err(to_rpc_error)?;
        Ok(CountResponse {
            animal_id: params.animal_id,
            count,
        })
    }

    /// vaccine.search.v1
    pub async fn search_vaccinations(
        &self,
        params: VaccineNameRequest,
    ) -> Result<Vec<VaccinationRecord>, ErrorObjectOwned> {
        self.vaccines
            .find_by_name(&params.name)
            .await
            .map_err(to_rpc_error)
    }
}

fn parse_species(value: &str) -> Result<Species, ErrorObjectOwned> {
    match value.to_uppercase().as_str() {
        "DOG" => Ok(Species::Dog),
        "CAT" => Ok(Species::Cat),
        "OTHER" => Ok(Species::Other),
        other => Err(ErrorObjectOwned::owned(
            code::VALIDATION_ERROR,
            format!("unknown species: {}", other),
            None::<()>,
        )),
    }
}
