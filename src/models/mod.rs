//! Modelos del sistema
//!
//! Este módulo contiene los modelos que mapean el schema PostgreSQL
//! y el documento devuelto por Eligible.

pub mod plan;
pub mod provider_document;

pub use plan::{NetworkDesignation, ProviderLookupFields};
pub use provider_document::{FinancialSummary, LevelAmount, ProviderDocument};
