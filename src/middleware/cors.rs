//! Middleware de CORS
//!
//! La vista de detalles del plan se sirve desde otro origen,
//! así que el endpoint de cifras necesita CORS.

use axum::http::{HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// CORS según la configuración.
///
/// Sin orígenes declarados se permite cualquier origen, salvo en producción,
/// donde la lista vacía no autoriza ninguno.
pub fn cors_layer(origins: &[String], production: bool) -> CorsLayer {
    if origins.is_empty() && !production {
        // NOTA: Permite cualquier origen - solo para desarrollo
        CorsLayer::very_permissive()
    } else {
        cors_middleware_with_origins(origins)
    }
}

/// Crear middleware de CORS con orígenes específicos
pub fn cors_middleware_with_origins(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([
            HeaderName::from_static("content-type"),
            HeaderName::from_static("accept"),
            HeaderName::from_static("origin"),
            HeaderName::from_static("x-requested-with"),
        ])
        .max_age(std::time::Duration::from_secs(3600))
}
