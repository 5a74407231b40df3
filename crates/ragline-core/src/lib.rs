//! ragline-core - Core types and traits for the ragline pipeline
//!
//! This crate provides the domain types, collaborator traits, error
//! handling, and configuration used throughout the ragline workspace.

pub mod config;
pub mod error;
pub mod provider;
pub mod traits;
pub mod types;

pub use config::*;
pub use error::{RaglineError, Result};
pub use provider::ProviderCell;
pub use traits::*;
pub use types::*;
