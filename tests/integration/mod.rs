//! Integration tests for annotrack
//!
//! These tests drive the public API across module boundaries, against real
//! backends.

pub mod config_tests;
pub mod csv_store_tests;
pub mod http_tests;
