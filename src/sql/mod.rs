//! Spatial SQL support.
//!
//! - [`dialect`] - capability tables per backend
//! - [`operator`] - spatial predicate operators
//! - [`converter`] - row value converters for geometry columns
//! - [`adapter`] - geometry query parameters

pub mod adapter;
pub mod converter;
pub mod dialect;
pub mod operator;

pub use adapter::WktAdapter;
pub use converter::{apply_converters, DbConverter};
pub use dialect::{CapabilityReport, MySql, SpatialBackend, SpatialDialect};
pub use operator::SpatialOperator;
