//! Clients - HTTP Clients for External APIs
//!
//! This module contains HTTP clients for communicating with external APIs.

pub mod eligible_client;

pub use eligible_client::{BenefitsProvider, EligibleClient, DEFAULT_ELIGIBLE_URL, DEFAULT_TIMEOUT_SECS};
