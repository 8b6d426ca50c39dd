//! Geometry query parameters.

use std::fmt;

use serde::Serialize;

/// A geometry bound as a WKT string plus SRID.
///
/// The dialect's geometry placeholder (`ST_GeomFromText(%s, <srid>)`) turns
/// the bound text back into a geometry on the server.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct WktAdapter {
    pub wkt: String,
    pub srid: u32,
}

impl WktAdapter {
    pub fn new(wkt: impl Into<String>, srid: u32) -> Self {
        Self {
            wkt: wkt.into(),
            srid,
        }
    }

    /// The value handed to the driver as the query parameter.
    pub fn param(&self) -> &str {
        &self.wkt
    }
}

impl fmt::Display for WktAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.wkt)
    }
}
