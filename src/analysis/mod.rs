//! Análisis del documento de Eligible

pub mod field_extractor;

pub use field_extractor::{decode_document, extract_individual_amount, summarize};
