use axum::{
    extract::{rejection::QueryRejection, Query, State},
    routing::get,
    Json, Router,
};
use tracing::{info, warn};

use crate::models::provider_document::FinancialSummary;
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};

/// Ruta usada por los clientes del backend anterior
pub const LEGACY_FINANCIALS_PATH: &str = "/GetInsurancePlanFinancials.php";

pub fn create_plan_financials_router() -> Router<AppState> {
    Router::new()
        .route("/api/insurance-plan/financials", get(get_plan_financials))
        .route(LEGACY_FINANCIALS_PATH, get(get_plan_financials))
}

/// `uip_id` de la query; con parámetros repetidos gana el último, como en el backend anterior
pub fn plan_id_from_query(pairs: &[(String, String)]) -> Option<String> {
    pairs
        .iter()
        .rev()
        .find(|(key, _)| key == "uip_id")
        .map(|(_, value)| value.clone())
        .filter(|id| !id.trim().is_empty())
}

async fn get_plan_financials(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> AppResult<Json<FinancialSummary>> {
    let Query(pairs) = query.map_err(|rejection| {
        warn!("⚠️ Query string inválida: {}", rejection.body_text());
        AppError::MissingParameter
    })?;

    let plan_id = plan_id_from_query(&pairs).ok_or(AppError::MissingParameter)?;

    info!("💰 Cifras de deducible solicitadas para plan {}", plan_id);
    let summary = state.financials.get_plan_financials(&plan_id).await?;
    Ok(Json(summary))
}
