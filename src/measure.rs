//! Distance quantities with unit conversion.
//!
//! A [`Distance`] stores its magnitude in metres and remembers the unit it was
//! created with for display. Spatial reference systems name their units with
//! free-form strings (`"metre"`, `"Foot (International)"`, ...), which
//! [`DistanceUnit::from_attname`] maps onto the canonical unit table.

use std::fmt;

use serde::Serialize;

use crate::error::GisError;

/// Canonical linear units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceUnit {
    Metre,
    Kilometre,
    Centimetre,
    Millimetre,
    Mile,
    NauticalMile,
    Foot,
    SurveyFoot,
    Yard,
    Inch,
    Chain,
}


/// Lowercase long names reported by spatial reference systems.
const ALIASES: &[(&str, DistanceUnit)] = &[
    ("meter", DistanceUnit::Metre),
    ("metre", DistanceUnit::Metre),
    ("meters", DistanceUnit::Metre),
    ("metres", DistanceUnit::Metre),
    ("kilometer", DistanceUnit::Kilometre),
    ("kilometre", DistanceUnit::Kilometre),
    ("centimeter", DistanceUnit::Centimetre),
    ("centimetre", DistanceUnit::Centimetre),
    ("millimeter", DistanceUnit::Millimetre),
    ("millimetre", DistanceUnit::Millimetre),
    ("mile", DistanceUnit::Mile),
    ("statute mile", DistanceUnit::Mile),
    ("nautical mile", DistanceUnit::NauticalMile),
    ("foot", DistanceUnit::Foot),
    ("feet", DistanceUnit::Foot),
    ("foot (international)", DistanceUnit::Foot),
    ("us survey foot", DistanceUnit::SurveyFoot),
    ("u.s. foot", DistanceUnit::SurveyFoot),
    ("yard", DistanceUnit::Yard),
    ("yards", DistanceUnit::Yard),
    ("inch", DistanceUnit::Inch),
    ("inches", DistanceUnit::Inch),
    ("chain", DistanceUnit::Chain),
];

impl DistanceUnit {
    pub const ALL: &'static [DistanceUnit] = &[
        DistanceUnit::Metre,
        DistanceUnit::Kilometre,
        DistanceUnit::Centimetre,
        DistanceUnit::Millimetre,
        DistanceUnit::Mile,
        DistanceUnit::NauticalMile,
        DistanceUnit::Foot,
        DistanceUnit::SurveyFoot,
        DistanceUnit::Yard,
        DistanceUnit::Inch,
        DistanceUnit::Chain,
    ];

    /// (short name, metres per unit)
    fn entry(&self) -> (&'static str, f64) {
        match self {
            DistanceUnit::Metre => ("m", 1.0),
            DistanceUnit::Kilometre => ("km", 1000.0),
            DistanceUnit::Centimetre => ("cm", 0.01),
            DistanceUnit::Millimetre => ("mm", 0.001),
            DistanceUnit::Mile => ("mi", 1609.344),
            DistanceUnit::NauticalMile => ("nm", 1852.0),
            DistanceUnit::Foot => ("ft", 0.3048),
            DistanceUnit::SurveyFoot => ("survey_ft", 0.304_800_609_601),
            DistanceUnit::Yard => ("yd", 0.9144),
            DistanceUnit::Inch => ("inch", 0.0254),
            DistanceUnit::Chain => ("chain", 20.1168),
        }
    }

    /// Short unit name (`m`, `km`, `survey_ft`, ...).
    pub fn as_str(&self) -> &'static str {
        self.entry().0
    }

    /// Number of metres in one of this unit.
    pub fn metres(&self) -> f64 {
        self.entry().1
    }

    /// Resolve a unit name as reported by a spatial reference system.
    ///
    /// Tries the short name exactly, then lowercased, then the alias table.
    pub fn from_attname(name: &str) -> Result<Self, GisError> {
        if let Some(unit) = Self::ALL.iter().find(|unit| unit.as_str() == name) {
            return Ok(*unit);
        }

        let lower = name.trim().to_lowercase();
        Self::ALL
            .iter()
            .find(|unit| unit.as_str() == lower)
            .copied()
            .or_else(|| {
                ALIASES
                    .iter()
                    .find(|(alias, _)| *alias == lower)
                    .map(|(_, unit)| *unit)
            })
            .ok_or_else(|| GisError::UnknownUnit(name.to_string()))
    }
}

impl fmt::Display for DistanceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A linear distance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Distance {
    metres: f64,
    unit: DistanceUnit,
}

impl Distance {
    pub fn new(value: f64, unit: DistanceUnit) -> Self {
        Self {
            metres: value * unit.metres(),
            unit,
        }
    }

    pub fn m(value: f64) -> Self {
        Self::new(value, DistanceUnit::Metre)
    }

    pub fn km(value: f64) -> Self {
        Self::new(value, DistanceUnit::Kilometre)
    }

    pub fn mi(value: f64) -> Self {
        Self::new(value, DistanceUnit::Mile)
    }

    pub fn ft(value: f64) -> Self {
        Self::new(value, DistanceUnit::Foot)
    }

    /// The unit this distance was created with.
    pub fn unit(&self) -> DistanceUnit {
        self.unit
    }

    /// Magnitude expressed in `unit`.
    pub fn in_unit(&self, unit: DistanceUnit) -> f64 {
        self.metres / unit.metres()
    }

    /// Magnitude expressed in the unit named by a spatial reference system.
    pub fn in_unit_named(&self, name: &str) -> Result<f64, GisError> {
        Ok(self.in_unit(DistanceUnit::from_attname(name)?))
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.in_unit(self.unit), self.unit)
    }
}

/// A raw distance lookup parameter: either a unit-bearing quantity or a bare
/// number already in the column's units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DistanceParam {
    Distance(Distance),
    Number(f64),
}

impl From<Distance> for DistanceParam {
    fn from(d: Distance) -> Self {
        DistanceParam::Distance(d)
    }
}

impl From<f64> for DistanceParam {
    fn from(n: f64) -> Self {
        DistanceParam::Number(n)
    }
}
