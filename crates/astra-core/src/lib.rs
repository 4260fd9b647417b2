//! # astra-core
//!
//! Core types, traits, and abstractions for the Astra vision API.
//!
//! This crate provides the foundational data structures and trait definitions
//! that the inference and API crates depend on:
//! - The shared [`Error`] type
//! - Image admission (base64 / data-URI decoding and validation)
//! - History entry models and the [`HistoryStore`] trait
//! - Default constants and structured logging field names

pub mod admission;
pub mod defaults;
pub mod error;
pub mod logging;
pub mod models;
pub mod traits;

// Re-export commonly used types at crate root
pub use admission::{admit, strip_data_uri, ImagePayload};
pub use error::{Error, Result};
pub use models::*;
pub use traits::{exchange_entries, HistoryStore};
