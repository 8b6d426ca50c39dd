//! MySQL spatial dialect.
//!
//! MySQL differences from other spatial backends:
//! - Predicates use minimum bounding rectangles (`MBRContains`, `MBRWithin`, ...)
//! - Distance lookups only accept values in the column's own units
//! - No `Collect`, `Extent`, `Extent3D`, `MakeLine` or `Union` aggregates
//! - Servers before 5.6.1 have no `ST_` prefix and call `Length` `GLength`
//! - Servers before 5.7.6 spell `MBREquals` as `MBREqual`
//! - Servers from 5.7.5 return empty collections as `GEOMETRYCOLLECTION()`

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};

use super::SpatialDialect;
use crate::capabilities::CapabilityFlags;
use crate::error::{GisError, GisResult};
use crate::field::{GeometryField, OutputField};
use crate::measure::DistanceParam;
use crate::sql::converter::{self, DbConverter};
use crate::sql::operator::SpatialOperator;
use crate::version::ServerVersion;
use crate::vocab::{AggregateKind, DistanceLookup};

const UNSUPPORTED_FUNCTIONS: &[&str] = &[
    "AsGML",
    "AsKML",
    "AsSVG",
    "Azimuth",
    "BoundingCircle",
    "ForceRHR",
    "LineLocatePoint",
    "MakeValid",
    "MemSize",
    "Perimeter",
    "PointOnSurface",
    "Reverse",
    "Scale",
    "SnapToGrid",
    "Transform",
    "Translate",
];

/// Unavailable before 5.7.5.
const GEOJSON_FUNCTIONS: &[&str] = &["AsGeoJSON", "GeoHash", "IsValid"];

/// Unavailable before 5.6.1.
const SET_OPERATION_FUNCTIONS: &[&str] = &[
    "Difference",
    "Distance",
    "Intersection",
    "SymDifference",
    "Union",
];

const DISALLOWED_AGGREGATES: &[AggregateKind] = &[
    AggregateKind::Collect,
    AggregateKind::Extent,
    AggregateKind::Extent3D,
    AggregateKind::MakeLine,
    AggregateKind::Union,
];

/// MySQL spatial dialect bound to one server version.
#[derive(Debug, Clone)]
pub struct MySql {
    version: ServerVersion,
    flags: CapabilityFlags,
    operators: BTreeMap<&'static str, SpatialOperator>,
    unsupported: BTreeSet<&'static str>,
}

impl MySql {
    pub fn new(version: ServerVersion) -> Self {
        let flags = CapabilityFlags::from_version(version);
        tracing::debug!(%version, ?flags, "derived mysql spatial capabilities");

        Self {
            version,
            flags,
            operators: gis_operators(&flags),
            unsupported: unsupported_functions(&flags),
        }
    }
}

fn gis_operators(flags: &CapabilityFlags) -> BTreeMap<&'static str, SpatialOperator> {
    let mbr_equals = if flags.is_pre_expression_dialect {
        "MBREqual"
    } else {
        "MBREquals"
    };

    [
        // bb* and contained mirror the PostGIS lookup names
        ("bbcontains", "MBRContains"),
        ("bboverlaps", "MBROverlaps"),
        ("contained", "MBRWithin"),
        ("contains", "MBRContains"),
        ("disjoint", "MBRDisjoint"),
        ("equals", mbr_equals),
        ("exact", mbr_equals),
        ("intersects", "MBRIntersects"),
        ("overlaps", "MBROverlaps"),
        ("same_as", mbr_equals),
        ("touches", "MBRTouches"),
        ("within", "MBRWithin"),
    ]
    .into_iter()
    .map(|(name, func)| (name, SpatialOperator::new(func)))
    .collect()
}

fn unsupported_functions(flags: &CapabilityFlags) -> BTreeSet<&'static str> {
    let mut unsupported: BTreeSet<&'static str> = UNSUPPORTED_FUNCTIONS.iter().copied().collect();
    if !flags.supports_geojson_family {
        unsupported.extend(GEOJSON_FUNCTIONS);
    }
    if flags.is_legacy_dialect {
        unsupported.extend(SET_OPERATION_FUNCTIONS);
    }
    unsupported
}

impl SpatialDialect for MySql {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn server_version(&self) -> ServerVersion {
        self.version
    }

    fn flags(&self) -> CapabilityFlags {
        self.flags
    }

    fn geom_func_prefix(&self) -> &'static str {
        if self.flags.is_legacy_dialect {
            ""
        } else {
            "ST_"
        }
    }

    fn gis_operators(&self) -> &BTreeMap<&'static str, SpatialOperator> {
        &self.operators
    }

    fn function_name_override(&self, name: &str) -> Option<&'static str> {
        match name {
            "Length" if self.flags.is_legacy_dialect => Some("GLength"),
            _ => None,
        }
    }

    fn unsupported_functions(&self) -> &BTreeSet<&'static str> {
        &self.unsupported
    }

    fn disallowed_aggregates(&self) -> &'static [AggregateKind] {
        DISALLOWED_AGGREGATES
    }

    fn geo_db_type(&self, field: &GeometryField) -> String {
        field.geom_type.as_str().to_string()
    }

    fn get_distance(
        &self,
        field: &GeometryField,
        values: &[DistanceParam],
        lookup: DistanceLookup,
    ) -> GisResult<Vec<f64>> {
        let value = values.first().ok_or(GisError::EmptyDistance)?;

        let dist_param = match value {
            DistanceParam::Distance(distance) => {
                if field.geodetic() {
                    tracing::warn!(
                        field = %field.name,
                        lookup = lookup.as_str(),
                        %distance,
                        "rejected unit-bearing distance on geodetic field"
                    );
                    return Err(GisError::UnsupportedGeodeticUnits);
                }
                let units = field
                    .units_name
                    .as_deref()
                    .ok_or_else(|| GisError::UnknownUnit(format!("SRID {}", field.srid)))?;
                distance.in_unit_named(units)?
            }
            DistanceParam::Number(n) => *n,
        };

        Ok(vec![dist_param])
    }

    fn post_process_geometry<'a>(&self, raw: &'a [u8]) -> Cow<'a, [u8]> {
        if self.flags.accepts_invalid_empty_collection_literal {
            converter::convert_invalid_empty_geometry_collection(raw)
        } else {
            Cow::Borrowed(raw)
        }
    }

    fn db_converters(&self, output: &OutputField) -> Vec<DbConverter> {
        let mut converters: Vec<DbConverter> = Vec::new();
        if output.is_geometry() && self.flags.accepts_invalid_empty_collection_literal {
            converters.push(converter::convert_invalid_empty_geometry_collection);
        }
        converters
    }
}
