//! Pet Registry
//!
//! Cats and dogs kept in an ordered in-memory registry and persisted to a
//! comma-separated flat file.

pub mod domain;
pub use domain::{Animal, Config, Kind, Registry, Species, UnknownKindError};

/// Flat-file persistence for the registry.
pub mod storage;
