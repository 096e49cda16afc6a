//! Error handling utilities
//!
//! This module provides the crate error type and its HTTP rendering.

pub mod error;

// Re-export commonly used types
pub use error::*;
