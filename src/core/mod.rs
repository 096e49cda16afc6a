//! Core functionality of the tracker
//!
//! Cell decoding, the record types, the record store and action dispatch.

pub mod action;
pub mod cell;
pub mod models;
pub mod seed;
pub mod store;

pub use action::{Action, Envelope, Payload};
pub use store::{Collections, RecordStore, StoreOptions};
