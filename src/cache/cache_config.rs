//! Configuración de cache
//!
//! Este módulo contiene la configuración de la cache de planes en la base de datos.

use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Configuración del cache
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Vigencia de `cached_plan` en segundos
    pub default_ttl: u32,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_ttl: 3600, // 1 hora
        }
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::seconds(i64::from(self.default_ttl))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ttl_is_one_hour() {
        assert_eq!(CacheConfig::default().ttl(), Duration::hours(1));
    }
}
