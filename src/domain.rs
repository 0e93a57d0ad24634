//! Domain models for the pet registry.
//!
//! This module contains the animal types, the registry that owns them, and
//! configuration.

/// Animals and their kind-specific attributes.
pub mod animal;
pub use animal::{Animal, Kind, Species, UnknownKindError};

mod config;
pub use config::Config;

pub mod registry;
pub use registry::Registry;
