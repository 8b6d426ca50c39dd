//! Error types for spatial capability resolution.

use thiserror::Error;

use crate::vocab::AggregateKind;

/// Result type for spatial dialect operations.
pub type GisResult<T> = Result<T, GisError>;

/// Errors raised while resolving spatial capabilities for a connection.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GisError {
    /// The compiler passed a predicate name the dialect does not map.
    #[error("unknown spatial predicate: {0}")]
    UnknownPredicate(String),

    /// A unit-bearing distance was used against a geodetic column.
    #[error(
        "only numeric values of degree units are allowed on geodetic distance queries"
    )]
    UnsupportedGeodeticUnits,

    /// The function is not available on this server version.
    #[error("spatial function not supported by this database: {0}")]
    UnsupportedFunction(String),

    /// The aggregate is never available on this backend.
    #[error("spatial aggregate not supported by this database: {0}")]
    UnsupportedAggregate(AggregateKind),

    /// The server reported a version string without a `major.minor.patch` prefix.
    #[error("invalid server version: {0:?}")]
    InvalidVersion(String),

    /// A measurement unit name that the distance table does not know.
    #[error("unknown distance unit: {0}")]
    UnknownUnit(String),

    /// A distance lookup was compiled without any parameter.
    #[error("distance lookup requires a value")]
    EmptyDistance,
}

impl GisError {
    /// Check if this error is retriable.
    ///
    /// Every decision here is a pure function of the server version and the
    /// input, so retrying with the same input reproduces the same error.
    pub fn is_retriable(&self) -> bool {
        false
    }

    /// Check if this error was caused by the user's query rather than the compiler.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedGeodeticUnits
                | Self::UnsupportedFunction(_)
                | Self::UnsupportedAggregate(_)
                | Self::EmptyDistance
        )
    }
}
