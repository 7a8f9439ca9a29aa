//! # quill-core
//!
//! Core types, traits, and abstractions for the quill note service.
//!
//! This crate provides the domain models, the error type, the repository
//! traits that storage backends implement, and tag derivation.

pub mod error;
pub mod logging;
pub mod models;
pub mod tags;
pub mod traits;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use models::*;
pub use tags::collect_unique_tags;
pub use traits::*;
