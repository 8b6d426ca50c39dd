//! Geometry column descriptors.

use std::fmt;

use serde::Serialize;

/// Default spatial reference system (WGS 84).
pub const DEFAULT_SRID: u32 = 4326;

/// Unit names that mark a spatial reference system as geodetic.
const GEODETIC_UNITS: &[&str] = &["degree", "decimal degree"];

/// Declared geometry type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GeometryType {
    Geometry,
    Point,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection,
}

impl GeometryType {
    /// SQL type name as written in column definitions.
    pub fn as_str(&self) -> &'static str {
        match self {
            GeometryType::Geometry => "GEOMETRY",
            GeometryType::Point => "POINT",
            GeometryType::LineString => "LINESTRING",
            GeometryType::Polygon => "POLYGON",
            GeometryType::MultiPoint => "MULTIPOINT",
            GeometryType::MultiLineString => "MULTILINESTRING",
            GeometryType::MultiPolygon => "MULTIPOLYGON",
            GeometryType::GeometryCollection => "GEOMETRYCOLLECTION",
        }
    }
}

impl fmt::Display for GeometryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unit name for a handful of well-known SRIDs.
fn srid_units(srid: u32) -> Option<&'static str> {
    match srid {
        4326 | 4269 | 4258 => Some("degree"),
        3857 | 27700 | 2154 | 32601..=32660 | 32701..=32760 => Some("metre"),
        _ => None,
    }
}

/// A geometry column as seen by the dialect.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeometryField {
    pub name: String,
    pub geom_type: GeometryType,
    pub srid: u32,
    /// Linear or angular unit of the column's spatial reference system.
    pub units_name: Option<String>,
}

impl GeometryField {
    /// Create a field in the default SRID.
    pub fn new(name: impl Into<String>, geom_type: GeometryType) -> Self {
        Self {
            name: name.into(),
            geom_type,
            srid: DEFAULT_SRID,
            units_name: srid_units(DEFAULT_SRID).map(String::from),
        }
    }

    /// Set the SRID, looking up its unit when it is well known.
    pub fn with_srid(mut self, srid: u32) -> Self {
        self.srid = srid;
        self.units_name = srid_units(srid).map(String::from);
        self
    }

    /// Set the unit name explicitly.
    pub fn with_units(mut self, units_name: impl Into<String>) -> Self {
        self.units_name = Some(units_name.into());
        self
    }

    /// Whether coordinates are angular.
    pub fn geodetic(&self) -> bool {
        self.units_name
            .as_deref()
            .map(|u| GEODETIC_UNITS.contains(&u.to_lowercase().as_str()))
            .unwrap_or(false)
    }
}

/// Declared output of a compiled expression.
#[derive(Debug, Clone, PartialEq)]
pub enum OutputField {
    Geometry(GeometryType),
    Other(String),
}

impl OutputField {
    pub fn is_geometry(&self) -> bool {
        matches!(self, OutputField::Geometry(_))
    }
}

impl From<&GeometryField> for OutputField {
    fn from(field: &GeometryField) -> Self {
        OutputField::Geometry(field.geom_type)
    }
}
