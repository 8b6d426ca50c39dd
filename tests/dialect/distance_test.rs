//! Distance parameter normalisation.

use mantis_gis::prelude::*;

fn dialect(major: u32, minor: u32, patch: u32) -> Box<dyn SpatialDialect> {
    SpatialBackend::MySql.dialect(ServerVersion::new(major, minor, patch))
}

#[test]
fn test_geodetic_units_rejected_for_every_version() {
    let field = GeometryField::new("location", GeometryType::Point).with_srid(4326);
    for (major, minor, patch) in [(5, 5, 0), (5, 6, 1), (5, 7, 5), (8, 0, 32)] {
        let err = dialect(major, minor, patch)
            .get_distance(&field, &[DistanceParam::from(Distance::km(5.0))], DistanceLookup::DWithin)
            .unwrap_err();
        assert_eq!(err, GisError::UnsupportedGeodeticUnits);
        assert!(err.is_user_error());
    }
}

#[test]
fn test_geodetic_numeric_degrees_accepted() {
    let field = GeometryField::new("location", GeometryType::Point);
    let params: Vec<DistanceParam> = vec![0.25.into()];
    assert_eq!(
        dialect(8, 0, 0)
            .get_distance(&field, &params, DistanceLookup::DistanceLte)
            .unwrap(),
        vec![0.25]
    );
}

#[test]
fn test_km_to_metre_field() {
    let field = GeometryField::new("parcel", GeometryType::Polygon).with_srid(27700);
    let params: Vec<DistanceParam> = vec![Distance::km(5.0).into()];
    assert_eq!(
        dialect(5, 7, 22)
            .get_distance(&field, &params, DistanceLookup::DistanceLt)
            .unwrap(),
        vec![5000.0]
    );
}

#[test]
fn test_metres_to_feet_field() {
    let field = GeometryField::new("lot", GeometryType::Polygon)
        .with_srid(2263)
        .with_units("US survey foot");
    let params: Vec<DistanceParam> = vec![Distance::ft(100.0).into()];
    let result = dialect(8, 0, 0)
        .get_distance(&field, &params, DistanceLookup::DistanceGte)
        .unwrap();
    assert_eq!(result.len(), 1);
    // international and survey feet differ by two parts per million
    assert!((result[0] - 99.9998).abs() < 1e-3, "{}", result[0]);
}
