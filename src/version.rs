//! Server version tuples.
//!
//! MySQL reports versions such as `5.7.22-log` or `8.0.32-0ubuntu0.22.04.2`.
//! Only the leading `major.minor.patch` triple takes part in capability
//! decisions; any vendor suffix is ignored.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::error::GisError;

static VERSION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\d+)\.(\d+)\.(\d+)").expect("version pattern is valid"));

/// A database server version, ordered lexicographically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ServerVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl ServerVersion {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parse the leading `major.minor.patch` of a server version string.
    pub fn parse(s: &str) -> Result<Self, GisError> {
        let caps = VERSION_PATTERN
            .captures(s)
            .ok_or_else(|| GisError::InvalidVersion(s.to_string()))?;

        let part = |i: usize| -> Result<u32, GisError> {
            caps[i]
                .parse()
                .map_err(|_| GisError::InvalidVersion(s.to_string()))
        };

        Ok(Self::new(part(1)?, part(2)?, part(3)?))
    }
}

impl FromStr for ServerVersion {
    type Err = GisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<(u32, u32, u32)> for ServerVersion {
    fn from((major, minor, patch): (u32, u32, u32)) -> Self {
        Self::new(major, minor, patch)
    }
}

impl fmt::Display for ServerVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
