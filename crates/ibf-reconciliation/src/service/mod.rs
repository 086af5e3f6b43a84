//! Service Layer
//!
//! Contains the application services that orchestrate domain logic
//! and coordinate with external dependencies via ports.

pub mod reconciliation_service;

pub use reconciliation_service::ReconciliationService;
