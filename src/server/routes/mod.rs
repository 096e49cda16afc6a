//! HTTP route modules

pub mod records;
