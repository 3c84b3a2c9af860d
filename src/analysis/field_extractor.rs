//! Extracción de cifras de deducible
//!
//! Recorre `plan.financials.deductible` y toma el importe de nivel
//! `INDIVIDUAL` de cada colección para la red del plan.

use serde_json::value::RawValue;
use tracing::debug;

use crate::models::plan::NetworkDesignation;
use crate::models::provider_document::{FinancialSummary, LevelAmount, NetworkAmounts, ProviderDocument};
use crate::utils::errors::{AppError, AppResult};

const INDIVIDUAL_LEVEL: &str = "INDIVIDUAL";

/// Importe de nivel individual de una colección, `"0"` si no hay ninguno.
///
/// Se recorre la colección completa: con entradas duplicadas gana la última.
/// Una entrada sin `level` o sin `amount` legible no cuenta como coincidencia.
// NOTE: "gana la última" es comportamiento heredado, posiblemente accidental.
pub fn extract_individual_amount(collection: &[LevelAmount]) -> String {
    let mut amount = "0".to_string();
    for entry in collection {
        if entry.level().as_deref() != Some(INDIVIDUAL_LEVEL) {
            continue;
        }
        if let Some(text) = entry.amount_text() {
            amount = text;
        }
    }
    amount
}

/// Decodificar el payload crudo de Eligible
pub fn decode_document(payload: &[u8]) -> AppResult<ProviderDocument> {
    serde_json::from_slice(payload)
        .map_err(|e| AppError::MalformedProviderDocument(format!("invalid plan JSON: {}", e)))
}

/// Resumen de deducible individual para la red indicada
pub fn summarize(document: &ProviderDocument, network: NetworkDesignation) -> AppResult<FinancialSummary> {
    let deductible = document
        .plan
        .as_ref()
        .and_then(|plan| plan.financials.as_ref())
        .and_then(|financials| financials.deductible.as_ref())
        .ok_or_else(|| missing("plan.financials.deductible"))?;

    let remainings = network_collection(deductible.remainings.as_ref(), network, "remainings")?;
    let spent = network_collection(deductible.spent.as_ref(), network, "spent")?;
    let totals = network_collection(deductible.totals.as_ref(), network, "totals")?;

    let summary = FinancialSummary {
        deductible_remaining: extract_individual_amount(&remainings),
        deductible_spent: extract_individual_amount(&spent),
        deductible_total: extract_individual_amount(&totals),
    };

    debug!(
        "📊 Deducible {}: remaining={} spent={} total={}",
        network.document_key(),
        summary.deductible_remaining,
        summary.deductible_spent,
        summary.deductible_total
    );

    Ok(summary)
}

/// Decodifica solo la colección de la red del plan; las entradas que no son objetos se ignoran
fn network_collection(
    amounts: Option<&NetworkAmounts>,
    network: NetworkDesignation,
    name: &str,
) -> AppResult<Vec<LevelAmount>> {
    let path = format!("plan.financials.deductible.{}", name);
    let amounts = amounts.ok_or_else(|| missing(&path))?;

    let raw = match network {
        NetworkDesignation::InNetwork => amounts.in_network.as_deref(),
        NetworkDesignation::OutNetwork => amounts.out_network.as_deref(),
    };
    let path = format!("{}.{}", path, network.document_key());
    let raw = raw.ok_or_else(|| missing(&path))?;

    let entries: Vec<&RawValue> = serde_json::from_str(raw.get())
        .map_err(|_| AppError::MalformedProviderDocument(format!("'{}' is not a list", path)))?;

    Ok(entries
        .into_iter()
        .filter_map(|entry| serde_json::from_str::<LevelAmount>(entry.get()).ok())
        .collect())
}

fn missing(path: &str) -> AppError {
    AppError::MalformedProviderDocument(format!("missing '{}'", path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(level: &str, amount: &str) -> LevelAmount {
        serde_json::from_str(&json!({"level": level, "amount": amount}).to_string()).unwrap()
    }

    fn document(value: serde_json::Value) -> ProviderDocument {
        decode_document(value.to_string().as_bytes()).unwrap()
    }

    #[test]
    fn test_extract_empty_collection() {
        assert_eq!(extract_individual_amount(&[]), "0");
    }

    #[test]
    fn test_extract_without_individual_level() {
        let collection = vec![entry("FAMILY", "4000.00")];
        assert_eq!(extract_individual_amount(&collection), "0");
    }

    #[test]
    fn test_extract_single_individual() {
        let collection = vec![entry("FAMILY", "4000.00"), entry("INDIVIDUAL", "2000.00")];
        assert_eq!(extract_individual_amount(&collection), "2000.00");
    }

    #[test]
    fn test_extract_last_individual_wins() {
        let collection = vec![
            entry("INDIVIDUAL", "100.00"),
            entry("FAMILY", "4000.00"),
            entry("INDIVIDUAL", "250.00"),
        ];
        assert_eq!(extract_individual_amount(&collection), "250.00");
    }

    #[test]
    fn test_summarize_in_network() {
        let doc = document(json!({
            "plan": {"financials": {"deductible": {
                "remainings": {"in_network": [{"level": "INDIVIDUAL", "amount": "359.53"}]},
                "spent": {"in_network": [{"level": "INDIVIDUAL", "amount": "1640.47"}]},
                "totals": {"in_network": [{"level": "INDIVIDUAL", "amount": "2000.00"}]}
            }}}
        }));

        let summary = summarize(&doc, NetworkDesignation::InNetwork).unwrap();
        assert_eq!(summary.deductible_remaining, "359.53");
        assert_eq!(summary.deductible_spent, "1640.47");
        assert_eq!(summary.deductible_total, "2000.00");
    }

    #[test]
    fn test_summarize_keeps_numeric_amount_text() {
        let doc = decode_document(
            br#"{"plan":{"financials":{"deductible":{
                "remainings":{"in_network":[{"level":"INDIVIDUAL","amount":2000.00}]},
                "spent":{"in_network":[{"level":"INDIVIDUAL","amount":12345678901234567890.12}]},
                "totals":{"in_network":[{"level":"INDIVIDUAL","amount":1e2}]}
            }}}}"#,
        )
        .unwrap();

        let summary = summarize(&doc, NetworkDesignation::InNetwork).unwrap();
        assert_eq!(summary.deductible_remaining, "2000.00");
        assert_eq!(summary.deductible_spent, "12345678901234567890.12");
        assert_eq!(summary.deductible_total, "1e2");
    }

    #[test]
    fn test_summarize_tolerates_incomplete_entries() {
        let doc = decode_document(
            br#"{"plan":{"financials":{"deductible":{
                "remainings":{
                    "in_network":[{"level":"INDIVIDUAL","amount":"359.53"}],
                    "out_network":[{"level":"FAMILY","amount":null}]
                },
                "spent":{
                    "in_network":[{"level":"INDIVIDUAL","amount":"1640.47"},{"level":"INDIVIDUAL"}],
                    "out_network":{"unexpected":"shape"}
                },
                "totals":{"in_network":[{"amount":"9999.99"},"junk",{"level":"INDIVIDUAL","amount":"2000.00"}]}
            }}}}"#,
        )
        .unwrap();

        let summary = summarize(&doc, NetworkDesignation::InNetwork).unwrap();
        assert_eq!(summary.deductible_remaining, "359.53");
        assert_eq!(summary.deductible_spent, "1640.47");
        assert_eq!(summary.deductible_total, "2000.00");
    }

    #[test]
    fn test_summarize_out_network_uses_its_own_collections() {
        let doc = document(json!({
            "plan": {"financials": {"deductible": {
                "remainings": {
                    "in_network": [{"level": "INDIVIDUAL", "amount": "1.00"}],
                    "out_network": [{"level": "INDIVIDUAL", "amount": "500.00"}]
                },
                "spent": {"out_network": []},
                "totals": {"out_network": [{"level": "FAMILY", "amount": "9000.00"}]}
            }}}
        }));

        let summary = summarize(&doc, NetworkDesignation::OutNetwork).unwrap();
        assert_eq!(summary.deductible_remaining, "500.00");
        assert_eq!(summary.deductible_spent, "0");
        assert_eq!(summary.deductible_total, "0");
    }

    #[test]
    fn test_summarize_missing_deductible() {
        let doc = document(json!({"plan": {"financials": {}}}));
        let err = summarize(&doc, NetworkDesignation::InNetwork).unwrap_err();
        assert!(matches!(err, AppError::MalformedProviderDocument(_)));
    }

    #[test]
    fn test_summarize_missing_network_collection() {
        let doc = document(json!({
            "plan": {"financials": {"deductible": {
                "remainings": {"in_network": []},
                "spent": {"in_network": []},
                "totals": {"in_network": []}
            }}}
        }));

        let err = summarize(&doc, NetworkDesignation::OutNetwork).unwrap_err();
        match err {
            AppError::MalformedProviderDocument(msg) => {
                assert!(msg.contains("remainings.out_network"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_summarize_network_collection_not_a_list() {
        let doc = document(json!({
            "plan": {"financials": {"deductible": {
                "remainings": {"in_network": {"level": "INDIVIDUAL"}},
                "spent": {"in_network": []},
                "totals": {"in_network": []}
            }}}
        }));

        let err = summarize(&doc, NetworkDesignation::InNetwork).unwrap_err();
        assert!(matches!(err, AppError::MalformedProviderDocument(_)));
    }

    #[test]
    fn test_decode_rejects_non_json() {
        let err = decode_document(b"<html>Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, AppError::MalformedProviderDocument(_)));
    }

    #[test]
    fn test_decode_ignores_unrelated_sections() {
        let doc = decode_document(br#"{"eligible_id":"abc","plan":{"coverage_status":"1"}}"#).unwrap();
        assert!(doc.plan.is_some());
        assert!(summarize(&doc, NetworkDesignation::InNetwork).is_err());
    }
}
