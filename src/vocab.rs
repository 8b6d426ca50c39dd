//! Spatial naming vocabulary shared by every backend.
//!
//! The host compiler refers to predicates, functions and aggregates by these
//! abstract names; each dialect decides how (and whether) to express them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lookup names a compiler may use for spatial predicates.
pub const PREDICATE_NAMES: &[&str] = &[
    "bbcontains",
    "bboverlaps",
    "contained",
    "contains",
    "disjoint",
    "equals",
    "exact",
    "intersects",
    "overlaps",
    "same_as",
    "touches",
    "within",
];

/// Spatial aggregate kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AggregateKind {
    Collect,
    Extent,
    Extent3D,
    MakeLine,
    Union,
}

impl AggregateKind {
    pub const ALL: [AggregateKind; 5] = [
        AggregateKind::Collect,
        AggregateKind::Extent,
        AggregateKind::Extent3D,
        AggregateKind::MakeLine,
        AggregateKind::Union,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AggregateKind::Collect => "Collect",
            AggregateKind::Extent => "Extent",
            AggregateKind::Extent3D => "Extent3D",
            AggregateKind::MakeLine => "MakeLine",
            AggregateKind::Union => "Union",
        }
    }

    /// Parse an aggregate name (case-insensitive).
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for AggregateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The kind of lookup a distance parameter belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceLookup {
    DistanceLt,
    DistanceLte,
    DistanceGt,
    DistanceGte,
    DWithin,
}

impl DistanceLookup {
    pub fn as_str(&self) -> &'static str {
        match self {
            DistanceLookup::DistanceLt => "distance_lt",
            DistanceLookup::DistanceLte => "distance_lte",
            DistanceLookup::DistanceGt => "distance_gt",
            DistanceLookup::DistanceGte => "distance_gte",
            DistanceLookup::DWithin => "dwithin",
        }
    }
}
