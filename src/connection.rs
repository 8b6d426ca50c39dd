//! Binding spatial capabilities to a database connection.
//!
//! The host connection layer reports the server version once; the capability
//! table is built from it immediately and kept for the connection's lifetime.

use std::borrow::Cow;

use crate::error::GisResult;
use crate::field::{GeometryField, GeometryType, OutputField, DEFAULT_SRID};
use crate::sql::converter::{apply_converters, DbConverter};
use crate::sql::dialect::{SpatialBackend, SpatialDialect};
use crate::version::ServerVersion;

/// A connection that can report the version string of its server.
pub trait ServerInfo {
    /// Raw version string as returned by the server (e.g. `SELECT VERSION()`).
    fn server_version_string(&self) -> &str;

    /// Parsed server version.
    fn server_version(&self) -> GisResult<ServerVersion> {
        ServerVersion::parse(self.server_version_string())
    }
}

impl ServerInfo for str {
    fn server_version_string(&self) -> &str {
        self
    }
}

impl ServerInfo for String {
    fn server_version_string(&self) -> &str {
        self
    }
}

/// Spatial capabilities of one open connection.
#[derive(Debug)]
pub struct SpatialConnection {
    backend: SpatialBackend,
    dialect: Box<dyn SpatialDialect>,
    default_srid: u32,
}

impl SpatialConnection {
    /// Read the server version and build the capability table for `backend`.
    pub fn open<I: ServerInfo + ?Sized>(info: &I, backend: SpatialBackend) -> GisResult<Self> {
        let version = info.server_version()?;
        Ok(Self::with_version(version, backend))
    }

    /// Build the capability table for a version that is already known.
    pub fn with_version(version: ServerVersion, backend: SpatialBackend) -> Self {
        tracing::debug!(%backend, %version, "binding spatial capabilities to connection");
        Self {
            backend,
            dialect: backend.dialect(version),
            default_srid: DEFAULT_SRID,
        }
    }

    /// Use `srid` for geometry fields that do not declare one.
    pub fn with_default_srid(mut self, srid: u32) -> Self {
        self.default_srid = srid;
        self
    }

    pub fn default_srid(&self) -> u32 {
        self.default_srid
    }

    /// Describe a geometry column in this connection's default SRID.
    pub fn geometry_field(
        &self,
        name: impl Into<String>,
        geom_type: GeometryType,
    ) -> GeometryField {
        GeometryField::new(name, geom_type).with_srid(self.default_srid)
    }

    pub fn backend(&self) -> SpatialBackend {
        self.backend
    }

    pub fn server_version(&self) -> ServerVersion {
        self.dialect.server_version()
    }

    /// The capability table consulted by the query compiler.
    pub fn ops(&self) -> &dyn SpatialDialect {
        self.dialect.as_ref()
    }

    /// Converters for a result column with the given output.
    pub fn db_converters(&self, output: &OutputField) -> Vec<DbConverter> {
        self.dialect.db_converters(output)
    }

    /// Decode a raw column value through the registered converters.
    pub fn convert_value<'a>(&self, output: &OutputField, raw: &'a [u8]) -> Cow<'a, [u8]> {
        apply_converters(&self.db_converters(output), raw)
    }
}
