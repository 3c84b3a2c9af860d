//! Modelo del plan de seguro del usuario
//!
//! Mapea las filas de `user_insurance_plan` / `insurance_provider`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Red del plan: dentro o fuera de la red del asegurador
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NetworkDesignation {
    InNetwork,
    OutNetwork,
}

impl NetworkDesignation {
    /// `"IN"` es la única clave dentro de la red; cualquier otro valor (o NULL) queda fuera
    pub fn from_code(code: Option<&str>) -> Self {
        match code {
            Some("IN") => NetworkDesignation::InNetwork,
            _ => NetworkDesignation::OutNetwork,
        }
    }

    /// Código enviado a Eligible en el parámetro `network`
    pub fn as_code(&self) -> &'static str {
        match self {
            NetworkDesignation::InNetwork => "IN",
            NetworkDesignation::OutNetwork => "OUT",
        }
    }

    /// Clave de la colección en `financials.deductible.*`
    pub fn document_key(&self) -> &'static str {
        match self {
            NetworkDesignation::InNetwork => "in_network",
            NetworkDesignation::OutNetwork => "out_network",
        }
    }
}

/// Campos necesarios para consultar Eligible (solo en cache miss)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderLookupFields {
    pub provider_npi: String,
    pub test_flag: bool,
    pub payer_id: String,
    pub member_id: String,
    pub network: NetworkDesignation,
}

/// Fila `user_insurance_plan` JOIN `insurance_provider`
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PlanLookupRow {
    pub provider_npi: Option<String>,
    pub test_flag: Option<bool>,
    pub payer_id: Option<String>,
    pub member_id: Option<String>,
    pub network: Option<String>,
}

impl From<PlanLookupRow> for ProviderLookupFields {
    fn from(row: PlanLookupRow) -> Self {
        Self {
            provider_npi: row.provider_npi.unwrap_or_default(),
            test_flag: row.test_flag.unwrap_or(false),
            payer_id: row.payer_id.unwrap_or_default(),
            member_id: row.member_id.unwrap_or_default(),
            network: NetworkDesignation::from_code(row.network.as_deref()),
        }
    }
}

/// Columnas de cache de `user_insurance_plan`
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CachedPlanRow {
    pub cached_plan: Option<Vec<u8>>,
    pub cached_plan_timestamp: Option<DateTime<Utc>>,
}
