//! Services module
//!
//! Este módulo contiene la lógica de negocio de la aplicación.
//! Los servicios combinan repositorios, clientes externos y el codec de cache.

pub mod plan_financials_service;

pub use plan_financials_service::{PayloadSource, PlanFinancialsService};
