use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use dotenvy::dotenv;

use deductible_cache::clients::EligibleClient;
use deductible_cache::config::{DatabaseConfig, EnvironmentConfig};
use deductible_cache::database::create_pool;
use deductible_cache::repositories::PlanRepository;
use deductible_cache::routes::{create_router, plan_financials_routes::LEGACY_FINANCIALS_PATH};
use deductible_cache::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("deductible_cache=debug,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    info!("🩺 Deductible Cache - Cifras de planes de seguro");
    info!("================================================");

    let config = match EnvironmentConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("❌ Configuración inválida: {}", e);
            return Err(anyhow::anyhow!("Error de configuración: {}", e));
        }
    };

    // Inicializar base de datos
    let pool = match create_pool(&DatabaseConfig::new(config.database_url.clone())).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    let provider = EligibleClient::new(config.eligible_api_url.clone(), config.eligible_timeout)?;
    info!("⚙️ Entorno: {}", config.environment);
    info!(
        "🌐 Eligible: {} (timeout {:?}, cache TTL {}s)",
        config.eligible_api_url, config.eligible_timeout, config.cache.default_ttl
    );

    let app_state = AppState::new(&config, Arc::new(PlanRepository::new(pool)), Arc::new(provider));
    let app = create_router(app_state, &config);

    let addr: SocketAddr = config.server_url().parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("   GET  /api/insurance-plan/financials?uip_id= - Cifras de deducible");
    info!("   GET  {}?uip_id= - Ruta legacy", LEGACY_FINANCIALS_PATH);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Error del servidor: {}", e);
        return Err(e.into());
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
