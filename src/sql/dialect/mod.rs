//! Spatial dialect capability tables.
//!
//! A host query compiler translates abstract spatial lookups (`contains`,
//! `within`, `Distance(...)`, `Extent(...)`) into SQL for one backend. Each
//! backend implements [`SpatialDialect`] to answer:
//!
//! - which SQL function implements a predicate
//! - which functions and aggregates it cannot execute
//! - how geometry values are read (`AsText`) and written (`GeomFromText`)
//! - how distance parameters are normalised for a column
//! - which converters must run on geometry result values
//!
//! Capabilities depend on the server version, so a dialect instance is bound
//! to one connection and built from that connection's version.
//!
//! # Usage
//!
//! ```ignore
//! use mantis_gis::sql::dialect::{SpatialBackend, SpatialDialect};
//! use mantis_gis::version::ServerVersion;
//!
//! let dialect = SpatialBackend::MySql.dialect(ServerVersion::new(5, 7, 22));
//! assert_eq!(dialect.predicate_function("equals")?, "MBREquals");
//! ```
//!
//! # MySQL version thresholds
//!
//! | Capability | < 5.6.1 | 5.6.1 – 5.7.4 | 5.7.5 | ≥ 5.7.6 |
//! |------------|---------|---------------|-------|---------|
//! | Function prefix | none | `ST_` | `ST_` | `ST_` |
//! | `Length` | `GLength` | `ST_Length` | `ST_Length` | `ST_Length` |
//! | `equals` predicate | `MBREqual` | `MBREqual` | `MBREqual` | `MBREquals` |
//! | `AsGeoJSON`, `GeoHash`, `IsValid` | ❌ | ❌ | ✓ | ✓ |
//! | `Difference`, `Distance`, `Intersection`, `SymDifference`, `Union` | ❌ | ✓ | ✓ | ✓ |
//! | `GEOMETRYCOLLECTION()` rewrite | | | ✓ | ✓ |

mod mysql;

pub use mysql::MySql;

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Serialize;

use crate::capabilities::CapabilityFlags;
use crate::error::{GisError, GisResult};
use crate::field::{GeometryField, OutputField};
use crate::measure::DistanceParam;
use crate::version::ServerVersion;
use crate::vocab::{AggregateKind, DistanceLookup};

use super::adapter::WktAdapter;
use super::converter::DbConverter;
use super::operator::SpatialOperator;

/// Spatial capability table for one backend and server version.
///
/// Default implementations describe a backend with `ST_`-prefixed functions,
/// no function overrides, no disallowed aggregates and no value converters.
pub trait SpatialDialect: fmt::Debug + Send + Sync {
    /// Dialect name for display/logging.
    fn name(&self) -> &'static str;

    /// Version of the server this table was built for.
    fn server_version(&self) -> ServerVersion;

    /// Version-derived flags.
    fn flags(&self) -> CapabilityFlags;

    // =========================================================================
    // Geometry text I/O
    // =========================================================================

    /// Prefix for spatial function names (`ST_`, or empty on old servers).
    fn geom_func_prefix(&self) -> &'static str {
        "ST_"
    }

    /// SELECT template that serialises a geometry column to WKT.
    fn select_template(&self) -> String {
        format!("{}AsText(%s)", self.geom_func_prefix())
    }

    /// Function that builds a geometry from a WKT literal.
    fn from_text(&self) -> String {
        format!("{}GeomFromText", self.geom_func_prefix())
    }

    /// Placeholder for a geometry query parameter bound to `field`.
    fn geometry_placeholder(&self, field: &GeometryField) -> String {
        format!("{}(%s, {})", self.from_text(), field.srid)
    }

    /// Wrap a WKT literal so it binds against [`Self::geometry_placeholder`].
    fn adapt_geometry(&self, wkt: &str, srid: u32) -> WktAdapter {
        WktAdapter::new(wkt, srid)
    }

    // =========================================================================
    // Predicates
    // =========================================================================

    /// All predicates this dialect can express.
    fn gis_operators(&self) -> &BTreeMap<&'static str, SpatialOperator>;

    /// The operator behind a predicate lookup name.
    fn spatial_operator(&self, name: &str) -> GisResult<&SpatialOperator> {
        self.gis_operators().get(name).ok_or_else(|| {
            tracing::warn!(dialect = self.name(), predicate = name, "unknown spatial predicate");
            GisError::UnknownPredicate(name.to_string())
        })
    }

    /// SQL function implementing a predicate.
    fn predicate_function(&self, name: &str) -> GisResult<&'static str> {
        Ok(self.spatial_operator(name)?.func)
    }

    // =========================================================================
    // Functions
    // =========================================================================

    /// Backend-specific name for an abstract function, if it differs.
    ///
    /// Returns `None` to keep the abstract name.
    fn function_name_override(&self, name: &str) -> Option<&'static str> {
        let _ = name;
        None
    }

    /// Abstract function names this server cannot execute.
    fn unsupported_functions(&self) -> &BTreeSet<&'static str>;

    /// Whether the server cannot execute the abstract function `name`.
    fn is_function_unsupported(&self, name: &str) -> bool {
        self.unsupported_functions().contains(name)
    }

    /// Resolve the SQL name for an abstract function, rejecting unsupported ones.
    fn resolve_function_name(&self, name: &str) -> GisResult<String> {
        if self.is_function_unsupported(name) {
            return Err(GisError::UnsupportedFunction(name.to_string()));
        }
        Ok(self
            .function_name_override(name)
            .map(String::from)
            .unwrap_or_else(|| name.to_string()))
    }

    // =========================================================================
    // Aggregates
    // =========================================================================

    /// Aggregates this backend never supports.
    fn disallowed_aggregates(&self) -> &'static [AggregateKind] {
        &[]
    }

    fn is_aggregate_disallowed(&self, kind: AggregateKind) -> bool {
        self.disallowed_aggregates().contains(&kind)
    }

    /// Reject a disallowed aggregate.
    fn check_aggregate(&self, kind: AggregateKind) -> GisResult<()> {
        if self.is_aggregate_disallowed(kind) {
            Err(GisError::UnsupportedAggregate(kind))
        } else {
            Ok(())
        }
    }

    // =========================================================================
    // Columns and parameters
    // =========================================================================

    /// Column type used to store `field`.
    fn geo_db_type(&self, field: &GeometryField) -> String;

    /// Normalise the parameter of a distance lookup against `field`.
    fn get_distance(
        &self,
        field: &GeometryField,
        values: &[DistanceParam],
        lookup: DistanceLookup,
    ) -> GisResult<Vec<f64>>;

    // =========================================================================
    // Result values
    // =========================================================================

    /// Fix up a raw geometry value returned by the server.
    fn post_process_geometry<'a>(&self, raw: &'a [u8]) -> Cow<'a, [u8]> {
        Cow::Borrowed(raw)
    }

    /// Converters to register for a result column with the given output.
    fn db_converters(&self, output: &OutputField) -> Vec<DbConverter> {
        let _ = output;
        Vec::new()
    }
}

/// Supported spatial backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SpatialBackend {
    #[default]
    MySql,
}

impl SpatialBackend {
    /// Parse a driver name.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "mysql" | "mariadb" => Some(SpatialBackend::MySql),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SpatialBackend::MySql => "mysql",
        }
    }

    /// Build the capability table for a server of the given version.
    pub fn dialect(&self, version: ServerVersion) -> Box<dyn SpatialDialect> {
        match self {
            SpatialBackend::MySql => Box::new(MySql::new(version)),
        }
    }
}

impl fmt::Display for SpatialBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Serialisable snapshot of a dialect's capability table.
#[derive(Debug, Clone, Serialize)]
pub struct CapabilityReport {
    pub dialect: &'static str,
    pub server_version: ServerVersion,
    pub flags: CapabilityFlags,
    pub geom_func_prefix: &'static str,
    pub select: String,
    pub from_text: String,
    pub operators: BTreeMap<&'static str, &'static str>,
    pub function_names: BTreeMap<&'static str, &'static str>,
    pub unsupported_functions: Vec<&'static str>,
    pub disallowed_aggregates: Vec<AggregateKind>,
}

/// Abstract functions that some backend renames.
const OVERRIDABLE_FUNCTIONS: &[&str] = &["Length"];

impl CapabilityReport {
    pub fn from_dialect(dialect: &dyn SpatialDialect) -> Self {
        Self {
            dialect: dialect.name(),
            server_version: dialect.server_version(),
            flags: dialect.flags(),
            geom_func_prefix: dialect.geom_func_prefix(),
            select: dialect.select_template(),
            from_text: dialect.from_text(),
            operators: dialect
                .gis_operators()
                .iter()
                .map(|(name, op)| (*name, op.func))
                .collect(),
            function_names: OVERRIDABLE_FUNCTIONS
                .iter()
                .filter_map(|name| dialect.function_name_override(name).map(|o| (*name, o)))
                .collect(),
            unsupported_functions: dialect.unsupported_functions().iter().copied().collect(),
            disallowed_aggregates: dialect.disallowed_aggregates().to_vec(),
        }
    }
}

impl fmt::Display for CapabilityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Dialect: {} {}", self.dialect, self.server_version)?;
        writeln!(f, "Prefix: {:?}", self.geom_func_prefix)?;
        writeln!(f, "Select: {}", self.select)?;
        writeln!(f, "From text: {}", self.from_text)?;
        writeln!(f, "Operators:")?;
        for (name, func) in &self.operators {
            writeln!(f, "  {name} -> {func}")?;
        }
        if !self.function_names.is_empty() {
            writeln!(f, "Function names:")?;
            for (name, renamed) in &self.function_names {
                writeln!(f, "  {name} -> {renamed}")?;
            }
        }
        writeln!(f, "Unsupported functions: {}", self.unsupported_functions.join(", "))?;
        let aggregates: Vec<&str> = self.disallowed_aggregates.iter().map(|a| a.as_str()).collect();
        write!(f, "Disallowed aggregates: {}", aggregates.join(", "))
    }
}
