//! Cache de cifras de deducible de planes de seguro
//!
//! Devuelve el deducible individual (restante, gastado, total) de un plan,
//! reutilizando la respuesta de Eligible cacheada en la base de datos
//! durante una hora.

pub mod analysis;
pub mod cache;
pub mod clients;
pub mod config;
pub mod database;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use models::FinancialSummary;
pub use state::AppState;
pub use utils::errors::{AppError, AppResult};
