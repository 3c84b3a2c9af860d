//! Cliente HTTP para la API de cobertura de Eligible
//!
//! Consulta `coverage/all.json` con `return_only=plan` y devuelve el cuerpo
//! crudo de la respuesta, que es lo que se cachea en la base de datos.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error, info};

use crate::models::plan::ProviderLookupFields;
use crate::utils::errors::{AppError, AppResult};

pub const DEFAULT_ELIGIBLE_URL: &str = "https://gds.eligibleapi.com/v1.5/coverage/all.json";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Fuente de los datos de cobertura de un plan
#[async_trait]
pub trait BenefitsProvider: Send + Sync {
    async fn fetch_plan_financials(&self, api_key: &str, fields: &ProviderLookupFields) -> AppResult<Vec<u8>>;
}

pub struct EligibleClient {
    client: Client,
    base_url: String,
}

impl EligibleClient {
    pub fn new(base_url: String, timeout: Duration) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("deductible-cache/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, base_url })
    }

    /// Parámetros de la consulta, en el orden que usa Eligible en su documentación
    pub fn query_params(api_key: &str, fields: &ProviderLookupFields) -> Vec<(&'static str, String)> {
        let mut params = vec![("api_key", api_key.to_string())];
        if fields.test_flag {
            params.push(("test", "true".to_string()));
        }
        params.push(("provider_npi", fields.provider_npi.clone()));
        params.push(("payer_id", fields.payer_id.clone()));
        params.push(("member_id", fields.member_id.clone()));
        params.push(("network", fields.network.as_code().to_string()));
        params.push(("return_only", "plan".to_string()));
        params
    }
}

#[async_trait]
impl BenefitsProvider for EligibleClient {
    async fn fetch_plan_financials(&self, api_key: &str, fields: &ProviderLookupFields) -> AppResult<Vec<u8>> {
        info!(
            "🌐 Consultando Eligible: payer_id={} member_id={} network={} test={}",
            fields.payer_id,
            fields.member_id,
            fields.network.as_code(),
            fields.test_flag
        );

        let response = self
            .client
            .get(&self.base_url)
            .query(&Self::query_params(api_key, fields))
            .send()
            .await
            .map_err(|e| {
                // El error de reqwest incluye la URL con el api_key
                let e = e.without_url();
                error!("❌ Eligible no disponible: {}", e);
                AppError::ProviderUnavailable(e.to_string())
            })?;

        let status = response.status();
        debug!("📡 Eligible response status: {}", status);

        if !status.is_success() {
            error!("❌ Eligible respondió con status {}", status);
            return Err(AppError::ProviderHttp {
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| AppError::ProviderUnavailable(e.without_url().to_string()))?;

        info!("✅ Eligible devolvió {} bytes", body.len());
        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::plan::NetworkDesignation;
    use httpmock::prelude::*;

    fn lookup_fields(test_flag: bool) -> ProviderLookupFields {
        ProviderLookupFields {
            provider_npi: "123".to_string(),
            test_flag,
            payer_id: "X".to_string(),
            member_id: "M1".to_string(),
            network: NetworkDesignation::InNetwork,
        }
    }

    #[test]
    fn test_query_params_without_test_flag() {
        let params = EligibleClient::query_params("secret", &lookup_fields(false));
        let keys: Vec<&str> = params.iter().map(|(k, _)| *k).collect();
        assert_eq!(
            keys,
            vec!["api_key", "provider_npi", "payer_id", "member_id", "network", "return_only"]
        );
    }

    #[test]
    fn test_query_params_with_test_flag() {
        let params = EligibleClient::query_params("secret", &lookup_fields(true));
        assert!(params.contains(&("test", "true".to_string())));
        assert!(params.contains(&("network", "IN".to_string())));
        assert!(params.contains(&("return_only", "plan".to_string())));
    }

    #[tokio::test]
    async fn test_fetch_returns_raw_body() {
        let server = MockServer::start_async().await;
        let body = r#"{"plan":{"financials":{}}}"#;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/coverage/all.json")
                    .query_param("api_key", "secret")
                    .query_param("provider_npi", "123")
                    .query_param("payer_id", "X")
                    .query_param("member_id", "M1")
                    .query_param("network", "IN")
                    .query_param("return_only", "plan");
                then.status(200)
                    .header("Content-Type", "application/json")
                    .body(body);
            })
            .await;

        let client = EligibleClient::new(server.url("/coverage/all.json"), Duration::from_secs(5)).unwrap();
        let raw = client
            .fetch_plan_financials("secret", &lookup_fields(false))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(raw, body.as_bytes());
    }

    #[tokio::test]
    async fn test_fetch_non_success_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/coverage/all.json");
                then.status(401).body(r#"{"error":"invalid api key"}"#);
            })
            .await;

        let client = EligibleClient::new(server.url("/coverage/all.json"), Duration::from_secs(5)).unwrap();
        let err = client
            .fetch_plan_financials("bad", &lookup_fields(false))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::ProviderHttp { status: 401 }));
    }

    #[tokio::test]
    async fn test_fetch_unreachable_provider() {
        // Puerto 9 (discard) no tiene listener en los runners
        let client = EligibleClient::new("http://127.0.0.1:9/coverage/all.json".to_string(), Duration::from_secs(2)).unwrap();
        let err = client
            .fetch_plan_financials("secret", &lookup_fields(false))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::ProviderUnavailable(_)));
    }

    #[tokio::test]
    async fn test_fetch_timeout() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/slow");
                then.status(200).delay(Duration::from_millis(1500)).body("{}");
            })
            .await;

        let client = EligibleClient::new(server.url("/slow"), Duration::from_millis(200)).unwrap();
        let err = client
            .fetch_plan_financials("secret", &lookup_fields(false))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::ProviderUnavailable(_)));
    }
}
