//! Documento devuelto por Eligible
//!
//! Solo se modela el subárbol `plan.financials.deductible`. Las colecciones
//! por red se guardan como JSON crudo y se decodifican únicamente para la red
//! del plan, así que las entradas de la otra red no pueden invalidar la respuesta.

use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

/// Respuesta de Eligible con `return_only=plan`.
///
/// Todos los niveles son opcionales para poder reportar exactamente qué parte falta.
#[derive(Debug, Deserialize)]
pub struct ProviderDocument {
    pub plan: Option<PlanSection>,
}

#[derive(Debug, Deserialize)]
pub struct PlanSection {
    pub financials: Option<Financials>,
}

#[derive(Debug, Deserialize)]
pub struct Financials {
    pub deductible: Option<Deductible>,
}

#[derive(Debug, Deserialize)]
pub struct Deductible {
    pub remainings: Option<NetworkAmounts>,
    pub spent: Option<NetworkAmounts>,
    pub totals: Option<NetworkAmounts>,
}

#[derive(Debug, Deserialize)]
pub struct NetworkAmounts {
    pub in_network: Option<Box<RawValue>>,
    pub out_network: Option<Box<RawValue>>,
}

/// Entrada `{level, amount}`; cualquiera de los dos puede faltar o venir a `null`
#[derive(Debug, Deserialize)]
pub struct LevelAmount {
    #[serde(default)]
    pub level: Option<Box<RawValue>>,
    #[serde(default)]
    pub amount: Option<Box<RawValue>>,
}

impl LevelAmount {
    /// Nivel de la entrada si es un string JSON
    pub fn level(&self) -> Option<String> {
        self.level
            .as_ref()
            .and_then(|raw| serde_json::from_str::<String>(raw.get()).ok())
    }

    /// Importe con su texto exacto: los strings sin comillas, los números tal como
    /// vienen en el JSON (`2000.00` sigue siendo `2000.00`)
    pub fn amount_text(&self) -> Option<String> {
        let raw = self.amount.as_ref()?.get().trim();
        match raw.chars().next()? {
            '"' => serde_json::from_str::<String>(raw).ok(),
            '-' | '0'..='9' => Some(raw.to_string()),
            _ => None,
        }
    }
}

/// Cifras de deducible individual devueltas al cliente
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialSummary {
    #[serde(rename = "Deductible_Remainings")]
    pub deductible_remaining: String,
    #[serde(rename = "Deductible_Spent")]
    pub deductible_spent: String,
    #[serde(rename = "Deductible_Totals")]
    pub deductible_total: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(json: &str) -> Vec<LevelAmount> {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_amount_keeps_exact_number_text() {
        let parsed = entries(
            r#"[{"level":"INDIVIDUAL","amount":2000.00},
                {"level":"INDIVIDUAL","amount":12345678901234567890.12},
                {"level":"INDIVIDUAL","amount":1e2},
                {"level":"INDIVIDUAL","amount":"359.53"}]"#,
        );

        let amounts: Vec<Option<String>> = parsed.iter().map(LevelAmount::amount_text).collect();
        assert_eq!(
            amounts,
            vec![
                Some("2000.00".to_string()),
                Some("12345678901234567890.12".to_string()),
                Some("1e2".to_string()),
                Some("359.53".to_string()),
            ]
        );
    }

    #[test]
    fn test_missing_or_null_fields() {
        let parsed = entries(
            r#"[{"amount":"10.00"},{"level":"FAMILY","amount":null},{"level":null},{"level":7,"amount":true}]"#,
        );

        assert_eq!(parsed[0].level(), None);
        assert_eq!(parsed[0].amount_text().as_deref(), Some("10.00"));
        assert_eq!(parsed[1].level().as_deref(), Some("FAMILY"));
        assert_eq!(parsed[1].amount_text(), None);
        assert_eq!(parsed[2].level(), None);
        assert_eq!(parsed[2].amount_text(), None);
        assert_eq!(parsed[3].level(), None);
        assert_eq!(parsed[3].amount_text(), None);
    }

    #[test]
    fn test_summary_serializes_legacy_keys() {
        let summary = FinancialSummary {
            deductible_remaining: "359.53".to_string(),
            deductible_spent: "1640.47".to_string(),
            deductible_total: "2000.00".to_string(),
        };

        assert_eq!(
            serde_json::to_string(&summary).unwrap(),
            r#"{"Deductible_Remainings":"359.53","Deductible_Spent":"1640.47","Deductible_Totals":"2000.00"}"#
        );
    }
}
