//! Servicio de cifras financieras del plan
//!
//! Cache-aside sobre la columna `cached_plan`: si hay un payload de Eligible
//! con menos de una hora se reutiliza, si no se consulta Eligible, se guarda
//! comprimido y se responde con el documento recién obtenido.

use chrono::Duration;
use std::sync::Arc;
use tracing::info;

use crate::analysis::field_extractor::{decode_document, summarize};
use crate::cache::payload_codec;
use crate::clients::eligible_client::BenefitsProvider;
use crate::models::plan::NetworkDesignation;
use crate::models::provider_document::FinancialSummary;
use crate::repositories::plan_repository::PlanRecordStore;
use crate::utils::errors::AppResult;

/// Origen del payload usado para responder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadSource {
    CacheHit,
    CacheMiss,
}

#[derive(Clone)]
pub struct PlanFinancialsService {
    store: Arc<dyn PlanRecordStore>,
    provider: Arc<dyn BenefitsProvider>,
    api_key: String,
    cache_ttl: Duration,
}

impl PlanFinancialsService {
    pub fn new(
        store: Arc<dyn PlanRecordStore>,
        provider: Arc<dyn BenefitsProvider>,
        api_key: String,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            store,
            provider,
            api_key,
            cache_ttl,
        }
    }

    /// Cifras de deducible individual del plan
    pub async fn get_plan_financials(&self, plan_id: &str) -> AppResult<FinancialSummary> {
        let (summary, _) = self.get_plan_financials_with_source(plan_id).await?;
        Ok(summary)
    }

    pub async fn get_plan_financials_with_source(
        &self,
        plan_id: &str,
    ) -> AppResult<(FinancialSummary, PayloadSource)> {
        let network = self.store.get_network_designation(plan_id).await?;

        let (payload, source) = match self
            .store
            .get_cached_payload_if_fresh(plan_id, self.cache_ttl)
            .await?
        {
            Some(blob) => {
                info!("📥 Cache HIT para plan {}", plan_id);
                (payload_codec::decompress(&blob)?, PayloadSource::CacheHit)
            }
            None => {
                info!("❌ Cache MISS para plan {}", plan_id);
                (self.refresh_cache(plan_id).await?, PayloadSource::CacheMiss)
            }
        };

        let summary = Self::respond(&payload, network)?;
        Ok((summary, source))
    }

    /// Consultar Eligible y guardar el payload comprimido
    async fn refresh_cache(&self, plan_id: &str) -> AppResult<Vec<u8>> {
        let fields = self.store.get_provider_lookup_fields(plan_id).await?;
        let payload = self
            .provider
            .fetch_plan_financials(&self.api_key, &fields)
            .await?;

        let compressed = payload_codec::compress(&payload)?;
        self.store.store_cached_payload(plan_id, &compressed).await?;
        info!(
            "💾 Plan {} cacheado ({} → {} bytes)",
            plan_id,
            payload.len(),
            compressed.len()
        );

        Ok(payload)
    }

    fn respond(payload: &[u8], network: NetworkDesignation) -> AppResult<FinancialSummary> {
        let document = decode_document(payload)?;
        summarize(&document, network)
    }
}
