use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use sqlx::PgPool;
use tracing::debug;

use crate::models::plan::{CachedPlanRow, NetworkDesignation, PlanLookupRow, ProviderLookupFields};
use crate::utils::errors::{AppError, AppResult};

/// Acceso a la fila del plan y a sus columnas de cache
#[async_trait]
pub trait PlanRecordStore: Send + Sync {
    async fn get_network_designation(&self, plan_id: &str) -> AppResult<NetworkDesignation>;

    /// Payload comprimido solo si `cached_plan_timestamp` está dentro del TTL
    async fn get_cached_payload_if_fresh(&self, plan_id: &str, ttl: Duration) -> AppResult<Option<Vec<u8>>>;

    async fn get_provider_lookup_fields(&self, plan_id: &str) -> AppResult<ProviderLookupFields>;

    /// Sobrescribe `cached_plan` y fija `cached_plan_timestamp` a ahora
    async fn store_cached_payload(&self, plan_id: &str, compressed_payload: &[u8]) -> AppResult<()>;
}

/// Lectura y escritura de la cache usan el mismo reloj: `NOW()` de la base de datos
const FRESH_CACHE_SQL: &str = r#"
    SELECT cached_plan, cached_plan_timestamp
    FROM user_insurance_plan
    WHERE id = $1 AND cached_plan_timestamp > NOW() - make_interval(secs => $2)
"#;

const STORE_CACHE_SQL: &str = r#"
    UPDATE user_insurance_plan
    SET cached_plan = $2, cached_plan_timestamp = NOW()
    WHERE id = $1
"#;

/// `true` si la entrada fue escrita estrictamente después de `now - ttl`
pub fn is_fresh(cached_at: DateTime<Utc>, now: DateTime<Utc>, ttl: Duration) -> bool {
    cached_at > now - ttl
}

/// TTL como segundos para `make_interval(secs => ..)`
fn ttl_seconds(ttl: Duration) -> f64 {
    ttl.num_milliseconds() as f64 / 1000.0
}

/// Los `uip_id` son enteros en la base de datos; cualquier otro valor no corresponde a ningún plan
fn parse_plan_id(plan_id: &str) -> AppResult<i64> {
    plan_id
        .trim()
        .parse::<i64>()
        .map_err(|_| AppError::PlanNotFound(plan_id.to_string()))
}

pub struct PlanRepository {
    pool: PgPool,
}

impl PlanRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlanRecordStore for PlanRepository {
    async fn get_network_designation(&self, plan_id: &str) -> AppResult<NetworkDesignation> {
        let id = parse_plan_id(plan_id)?;

        let row: Option<(Option<String>,)> =
            sqlx::query_as("SELECT uip.network FROM user_insurance_plan AS uip WHERE uip.id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        let (network,) = row.ok_or_else(|| AppError::PlanNotFound(plan_id.to_string()))?;
        Ok(NetworkDesignation::from_code(network.as_deref()))
    }

    async fn get_cached_payload_if_fresh(&self, plan_id: &str, ttl: Duration) -> AppResult<Option<Vec<u8>>> {
        let Ok(id) = parse_plan_id(plan_id) else {
            return Ok(None);
        };

        let row = sqlx::query_as::<_, CachedPlanRow>(FRESH_CACHE_SQL)
            .bind(id)
            .bind(ttl_seconds(ttl))
            .fetch_optional(&self.pool)
            .await?;

        let payload = row.and_then(|r| r.cached_plan);
        debug!(
            "🔍 Cache de plan {}: {}",
            plan_id,
            if payload.is_some() { "vigente" } else { "ausente o expirada" }
        );
        Ok(payload)
    }

    async fn get_provider_lookup_fields(&self, plan_id: &str) -> AppResult<ProviderLookupFields> {
        let id = parse_plan_id(plan_id)?;

        let row = sqlx::query_as::<_, PlanLookupRow>(
            r#"
            SELECT ip.provider_npi, ip.test_flag, uip.payer_id, uip.member_id, uip.network
            FROM user_insurance_plan AS uip
            JOIN insurance_provider AS ip ON ip.id = uip.provider_id
            WHERE uip.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(ProviderLookupFields::from)
            .ok_or_else(|| AppError::PlanNotFound(plan_id.to_string()))
    }

    async fn store_cached_payload(&self, plan_id: &str, compressed_payload: &[u8]) -> AppResult<()> {
        let id = parse_plan_id(plan_id)?;

        let result = sqlx::query(STORE_CACHE_SQL)
            .bind(id)
            .bind(compressed_payload)
            .execute(&self.pool)
            .await?;

        debug!(
            "💾 Cache de plan {} guardada ({} bytes, {} filas)",
            plan_id,
            compressed_payload.len(),
            result.rows_affected()
        );
        Ok(())
    }
}
