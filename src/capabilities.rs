//! Version-derived capability flags.
//!
//! Every version threshold used by the MySQL spatial dialect lives here. The
//! flags are computed once from a [`ServerVersion`] and never change for the
//! lifetime of a connection.

use serde::Serialize;

use crate::version::ServerVersion;

/// `ST_`-prefixed spatial functions and `GLength` removal.
pub const EXPRESSION_PREFIX_SINCE: ServerVersion = ServerVersion::new(5, 6, 1);

/// `AsGeoJSON`, `GeoHash`, `IsValid` and the `GEOMETRYCOLLECTION()` literal.
pub const GEOJSON_SINCE: ServerVersion = ServerVersion::new(5, 7, 5);

/// `MBREquals` replaces `MBREqual`.
pub const MBR_EQUALS_SINCE: ServerVersion = ServerVersion::new(5, 7, 6);

/// Capability flags derived from a server version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CapabilityFlags {
    /// Server predates 5.6.1: no `ST_` prefix, `GLength` instead of `Length`.
    pub is_legacy_dialect: bool,

    /// Server predates 5.7.6: `MBREqual` instead of `MBREquals`.
    pub is_pre_expression_dialect: bool,

    /// Server is 5.7.5 or later and returns empty collections as `GEOMETRYCOLLECTION()`.
    pub accepts_invalid_empty_collection_literal: bool,

    /// Server is 5.7.5 or later and provides `AsGeoJSON`, `GeoHash` and `IsValid`.
    pub supports_geojson_family: bool,
}

impl CapabilityFlags {
    pub fn from_version(version: ServerVersion) -> Self {
        Self {
            is_legacy_dialect: version < EXPRESSION_PREFIX_SINCE,
            is_pre_expression_dialect: version < MBR_EQUALS_SINCE,
            accepts_invalid_empty_collection_literal: version >= GEOJSON_SINCE,
            supports_geojson_family: version >= GEOJSON_SINCE,
        }
    }
}

impl From<ServerVersion> for CapabilityFlags {
    fn from(version: ServerVersion) -> Self {
        Self::from_version(version)
    }
}
