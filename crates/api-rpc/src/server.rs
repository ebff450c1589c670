//! JSON-RPC Server
//!
//! Serves the clinic API over JSON-RPC 2.0 on localhost TCP.

use std::sync::Arc;

use jsonrpsee::server::{Server, ServerHandle};
use jsonrpsee::RpcModule;
use tracing::info;

use healthpet_core::application::{AnimalService, ProfileService, VaccinationService};

use crate::handler::RpcHandler;
use crate::types::{
    AnimalIdRequest, RecordIdRequest, SearchAnimalsRequest, UpdateAnimalRequest,
    UpdateVaccinationRequest, UpsertProfileRequest, VaccineNameRequest, WindowRequest,
};

const DEFAULT_RPC_HOST: &str = "127.0.0.1";
const DEFAULT_RPC_PORT: u16 = 9539;

/// RPC Server Configuration
pub struct RpcServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for RpcServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_RPC_HOST.to_string(),
            port: DEFAULT_RPC_PORT,
        }
    }
}

/// RPC Server
pub struct RpcServer {
    config: RpcServerConfig,
    handler: Arc<RpcHandler>,
}

/// Register a parameterized method on the module
macro_rules! register {
    ($module:expr, $name:literal, $req:ty, $method:ident) => {{
        $module
            .register_async_method($name, move |params, ctx, _| async move {
                let req: $req = params.parse()?;
                ctx.$method(req).await
            })
            .map_err(|e| e.to_string())?;
    }};
}

/// Register a parameterless method on the module
macro_rules! register_plain {
    ($module:expr, $name:literal, $method:ident) => {{
        $module
            .register_async_method($name, move |_params, ctx, _| async move {
                ctx.$method().await
            })
            .map_err(|e| e.to_string())?;
    }};
}

impl RpcServer {
    pub fn new(
        config: RpcServerConfig,
        animals: Arc<AnimalService>,
        vaccines: Arc<VaccinationService>,
        profiles: Arc<ProfileService>,
    ) -> Self {
        Self {
            config,
            handler: Arc::new(RpcHandler::new(animals, vaccines, profiles)),
        }
    }

    /// Start the JSON-RPC server
    ///
    /// Security: only binds to localhost (no external access)
    pub async fn start(self) -> Result<ServerHandle, String> {
        let addr = format!("{}:{}", self.config.host, self.config.port);

        info!(
            host = %self.config.host,
            port = %self.config.port,
            "Starting JSON-RPC server on TCP (localhost only)"
        );

        let server = Server::builder()
            .build(&addr)
            .await
            .map_err(|e| format!("Failed to build server on {}: {}", addr, e))?;

        let mut module = RpcModule::new(self.handler.clone());

        // animal.*
        register!(module, "animal.register.v1", healthpet_core::application::RegisterAnimalRequest, register_animal);
        register!(module, "animal.get.v1", AnimalIdRequest, get_animal);
        register_plain!(module, "animal.list.v1", list_animals);
        register!(module, "animal.search.v1", SearchAnimalsRequest, search_animals);
        register!(module, "animal.update.v1", UpdateAnimalRequest, update_animal);
        register!(module, "animal.remove.v1", AnimalIdRequest, remove_animal);
        register!(module, "animal.card.v1", AnimalIdRequest, animal_card);

        // profile.*
        register!(module, "profile.get.v1", AnimalIdRequest, get_profile);
        register!(module, "profile.upsert.v1", UpsertProfileRequest, upsert_profile);

        // vaccine.*
        register!(module, "vaccine.register.v1", healthpet_core::application::RegisterVaccinationRequest, register_vaccination);
        register!(module, "vaccine.get.v1", RecordIdRequest, get_vaccination);
        register!(module, "vaccine.detail.v1", RecordIdRequest, vaccination_detail);
        register!(module, "vaccine.update.v1", UpdateVaccinationRequest, update_vaccination);
        register!(module, "vaccine.remove.v1", RecordIdRequest, remove_vaccination);
        register!(module, "vaccine.complete.v1", RecordIdRequest, complete_vaccination);
        register_plain!(module, "vaccine.list.v1", list_vaccinations);
        register!(module, "vaccine.for_animal.v1", AnimalIdRequest, vaccinations_for_animal);
        register!(module, "vaccine.pending.v1", AnimalIdRequest, pending_vaccinations);
        register_plain!(module, "vaccine.overdue.v1", overdue_vaccinations);
        register!(module, "vaccine.due_soon.v1", WindowRequest, due_soon_vaccinations);
        register!(module, "vaccine.upcoming.v1", WindowRequest, upcoming_vaccinations);
        register!(module, "vaccine.stats.v1", AnimalIdRequest, vaccination_stats);
        register!(module, "vaccine.next.v1", AnimalIdRequest, next_vaccination);
        register!(module, "vaccine.alerts.v1", AnimalIdRequest, vaccination_alerts);
        register!(module, "vaccine.count.v1", AnimalIdRequest, vaccination_count);
        register!(module, "vaccine.search.v1", VaccineNameRequest, search_vaccinations);

        let handle = server.start(module);

        info!("JSON-RPC server started");

        Ok(handle)
    }
}
