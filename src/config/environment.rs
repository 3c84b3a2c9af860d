//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.
//! Las credenciales pueden venir en la variable o en un fichero `.key`
//! (`*_FILE`), como en el despliegue anterior.

use std::env;
use std::time::Duration;

use crate::cache::CacheConfig;
use crate::clients::eligible_client::{DEFAULT_ELIGIBLE_URL, DEFAULT_TIMEOUT_SECS};
use crate::utils::errors::{configuration_error, AppError, AppResult};

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub database_url: String,
    pub eligible_api_key: String,
    pub eligible_api_url: String,
    pub eligible_timeout: Duration,
    pub cache: CacheConfig,
    pub cors_origins: Vec<String>,
}

impl EnvironmentConfig {
    /// Cargar la configuración desde las variables de entorno del proceso
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Cargar la configuración desde una función de búsqueda (tests)
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = read_secret(&lookup, "DATABASE_URL", "DATABASE_URL_FILE")?
            .ok_or_else(|| configuration_error("Database API key is not present."))?;
        let eligible_api_key = read_secret(&lookup, "ELIGIBLE_API_KEY", "ELIGIBLE_API_KEY_FILE")?
            .ok_or_else(|| configuration_error("Eligible API key is not present."))?;

        let cache = CacheConfig {
            default_ttl: parse_or(&lookup, "PLAN_CACHE_TTL_SECS", CacheConfig::default().default_ttl)?,
        };
        let timeout_secs: u64 = parse_or(&lookup, "ELIGIBLE_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;

        Ok(Self {
            environment: lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            port: parse_or(&lookup, "PORT", 3000)?,
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            database_url,
            eligible_api_key,
            eligible_api_url: lookup("ELIGIBLE_API_URL").unwrap_or_else(|| DEFAULT_ELIGIBLE_URL.to_string()),
            eligible_timeout: Duration::from_secs(timeout_secs),
            cache,
            cors_origins: lookup("CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
        })
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la dirección del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Valor directo de la variable, o contenido (sin espacios) del fichero indicado
fn read_secret<F>(lookup: &F, var: &str, file_var: &str) -> AppResult<Option<String>>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = lookup(var).map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
        return Ok(Some(value));
    }

    let Some(path) = lookup(file_var) else {
        return Ok(None);
    };

    match std::fs::read_to_string(&path) {
        Ok(contents) => {
            let value = contents.trim().to_string();
            Ok((!value.is_empty()).then_some(value))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(AppError::Configuration(format!("Cannot read {}: {}", file_var, e))),
    }
}

fn parse_or<F, T>(lookup: &F, var: &str, default: T) -> AppResult<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(var) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Configuration(format!("{} must be a valid number", var))),
        None => Ok(default),
    }
}
