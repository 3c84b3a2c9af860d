//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use crate::clients::eligible_client::BenefitsProvider;
use crate::config::EnvironmentConfig;
use crate::repositories::plan_repository::PlanRecordStore;
use crate::services::PlanFinancialsService;

#[derive(Clone)]
pub struct AppState {
    pub financials: PlanFinancialsService,
}

impl AppState {
    pub fn new(
        config: &EnvironmentConfig,
        store: Arc<dyn PlanRecordStore>,
        provider: Arc<dyn BenefitsProvider>,
    ) -> Self {
        Self {
            financials: PlanFinancialsService::new(
                store,
                provider,
                config.eligible_api_key.clone(),
                config.cache.ttl(),
            ),
        }
    }
}
