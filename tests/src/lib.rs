//! # IBF Reconciliation Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/      # Two-party reconciliation flows
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p ibf-tests
//!
//! # With peeling logs
//! RUST_LOG=ibf_reconciliation=trace cargo test -p ibf-tests -- --nocapture
//! ```

#![allow(dead_code)]

pub mod integration;
