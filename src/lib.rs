//! # mantis-gis
//!
//! Version-aware spatial capability tables for SQL backends.
//!
//! A host query compiler consults a [`SpatialDialect`] when it translates
//! abstract spatial lookups into SQL for one database connection:
//!
//! ```text
//! ┌──────────────────────────┐     server version      ┌────────────────────┐
//! │   host connection layer  │ ──────────────────────▶ │ SpatialConnection  │
//! └──────────────────────────┘                         │  (CapabilityFlags) │
//!                                                      └─────────┬──────────┘
//!                                                                │ SpatialDialect
//!                                                                ▼
//! ┌──────────────────────────┐  predicate / function   ┌────────────────────┐
//! │   host query compiler    │ ◀─────────────────────▶ │ MySQL capability   │
//! │                          │  names, distance params │ table              │
//! └──────────────────────────┘                         └────────────────────┘
//! ```
//!
//! The crate does no SQL parsing, planning, geometry computation or I/O.

pub mod capabilities;
pub mod config;
pub mod connection;
pub mod error;
pub mod field;
pub mod measure;
pub mod sql;
pub mod version;
pub mod vocab;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::capabilities::CapabilityFlags;
    pub use crate::connection::{ServerInfo, SpatialConnection};
    pub use crate::error::{GisError, GisResult};
    pub use crate::field::{GeometryField, GeometryType, OutputField};
    pub use crate::measure::{Distance, DistanceParam, DistanceUnit};
    pub use crate::sql::dialect::{SpatialBackend, SpatialDialect};
    pub use crate::version::ServerVersion;
    pub use crate::vocab::{AggregateKind, DistanceLookup};
}

pub use connection::SpatialConnection;
pub use error::{GisError, GisResult};
pub use sql::dialect::{SpatialBackend, SpatialDialect};
pub use version::ServerVersion;
