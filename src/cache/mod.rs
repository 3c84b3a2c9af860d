//! Cache
//!
//! Este módulo contiene la configuración y el codec de la cache de planes.

pub mod cache_config;
pub mod payload_codec;

pub use cache_config::CacheConfig;
