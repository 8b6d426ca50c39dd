//! Row value converters for geometry result columns.
//!
//! Converters run in the row-decoding pipeline, in registration order, on the
//! raw bytes the driver returns for a column.

use std::borrow::Cow;

/// Raw WKT MySQL 5.7.5+ returns for an empty geometry collection.
pub const INVALID_EMPTY_COLLECTION: &[u8] = b"GEOMETRYCOLLECTION()";

/// Valid WKT for an empty geometry collection.
pub const EMPTY_COLLECTION: &[u8] = b"GEOMETRYCOLLECTION EMPTY";

/// A converter applied to a raw column value.
pub type DbConverter = for<'a> fn(&'a [u8]) -> Cow<'a, [u8]>;

/// Rewrite `GEOMETRYCOLLECTION()` to `GEOMETRYCOLLECTION EMPTY`.
///
/// Only an exact match is rewritten. Empty collections nested inside other
/// geometries are passed through untouched.
pub fn convert_invalid_empty_geometry_collection(value: &[u8]) -> Cow<'_, [u8]> {
    if value == INVALID_EMPTY_COLLECTION {
        Cow::Borrowed(EMPTY_COLLECTION)
    } else {
        Cow::Borrowed(value)
    }
}

/// Run `value` through each converter in turn.
pub fn apply_converters<'a>(converters: &[DbConverter], value: &'a [u8]) -> Cow<'a, [u8]> {
    converters
        .iter()
        .fold(Cow::Borrowed(value), |acc, convert| match acc {
            Cow::Borrowed(bytes) => convert(bytes),
            Cow::Owned(bytes) => Cow::Owned(convert(&bytes).into_owned()),
        })
}
