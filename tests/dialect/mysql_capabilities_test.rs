//! Version-threshold behaviour of the MySQL spatial capability table.

use mantis_gis::prelude::*;

const LEGACY: &[(u32, u32, u32)] = &[(5, 0, 0), (5, 5, 62), (5, 6, 0)];
const PRE_EXPRESSION: &[(u32, u32, u32)] = &[(5, 6, 1), (5, 6, 51), (5, 7, 4), (5, 7, 5)];
const MODERN: &[(u32, u32, u32)] = &[(5, 7, 6), (5, 7, 44), (8, 0, 0), (8, 4, 3)];

fn mysql(v: (u32, u32, u32)) -> Box<dyn SpatialDialect> {
    SpatialBackend::MySql.dialect(ServerVersion::from(v))
}

fn all_versions() -> impl Iterator<Item = (u32, u32, u32)> {
    LEGACY
        .iter()
        .chain(PRE_EXPRESSION)
        .chain(MODERN)
        .copied()
}

#[test]
fn test_legacy_prefix_and_length() {
    for &v in LEGACY {
        let d = mysql(v);
        assert_eq!(d.geom_func_prefix(), "", "{v:?}");
        assert_eq!(d.function_name_override("Length"), Some("GLength"), "{v:?}");
        assert_eq!(d.select_template(), "AsText(%s)");
        assert_eq!(d.from_text(), "GeomFromText");
    }
    for &v in PRE_EXPRESSION.iter().chain(MODERN) {
        let d = mysql(v);
        assert_eq!(d.geom_func_prefix(), "ST_", "{v:?}");
        assert_eq!(d.function_name_override("Length"), None, "{v:?}");
        assert_eq!(d.select_template(), "ST_AsText(%s)");
        assert_eq!(d.from_text(), "ST_GeomFromText");
    }
}

#[test]
fn test_equals_family() {
    for &v in LEGACY.iter().chain(PRE_EXPRESSION) {
        let d = mysql(v);
        for name in ["equals", "exact", "same_as"] {
            assert_eq!(d.predicate_function(name).unwrap(), "MBREqual", "{v:?} {name}");
        }
    }
    for &v in MODERN {
        let d = mysql(v);
        for name in ["equals", "exact", "same_as"] {
            assert_eq!(d.predicate_function(name).unwrap(), "MBREquals", "{v:?} {name}");
        }
    }
}

#[test]
fn test_every_vocabulary_predicate_is_mapped() {
    for v in all_versions() {
        let d = mysql(v);
        for name in mantis_gis::vocab::PREDICATE_NAMES {
            let func = d.predicate_function(name).unwrap();
            assert!(func.starts_with("MBR"), "{name} -> {func}");
        }
        assert_eq!(d.gis_operators().len(), mantis_gis::vocab::PREDICATE_NAMES.len());
    }
}

#[test]
fn test_unknown_predicate_fails_fast() {
    let err = mysql((8, 0, 0)).predicate_function("crosses").unwrap_err();
    assert_eq!(err, GisError::UnknownPredicate("crosses".to_string()));
    assert!(!err.is_retriable());
    assert!(!err.is_user_error());
}

#[test]
fn test_asgeojson_threshold() {
    assert!(mysql((5, 7, 4)).is_function_unsupported("AsGeoJSON"));
    assert!(mysql((5, 6, 0)).is_function_unsupported("AsGeoJSON"));
    assert!(!mysql((5, 7, 5)).is_function_unsupported("AsGeoJSON"));
    assert!(!mysql((8, 0, 0)).is_function_unsupported("AsGeoJSON"));
}

#[test]
fn test_unsupported_set_sizes() {
    // 16 base + 3 GeoJSON + 5 set operations
    assert_eq!(mysql((5, 5, 0)).unsupported_functions().len(), 24);
    assert_eq!(mysql((5, 7, 4)).unsupported_functions().len(), 19);
    assert_eq!(mysql((5, 7, 5)).unsupported_functions().len(), 16);
}

#[test]
fn test_base_set_is_version_independent() {
    for v in all_versions() {
        let d = mysql(v);
        assert!(d.is_function_unsupported("Transform"));
        assert!(d.is_function_unsupported("AsKML"));
        assert!(!d.is_function_unsupported("Area"));
    }
}

#[test]
fn test_extent_always_disallowed() {
    for v in all_versions() {
        let d = mysql(v);
        assert!(d.is_aggregate_disallowed(AggregateKind::Extent));
        assert!(matches!(
            d.check_aggregate(AggregateKind::Extent),
            Err(GisError::UnsupportedAggregate(AggregateKind::Extent))
        ));
    }
}

#[test]
fn test_empty_collection_post_processing() {
    for v in all_versions() {
        let d = mysql(v);
        let expected: &[u8] = if ServerVersion::from(v) >= ServerVersion::new(5, 7, 5) {
            b"GEOMETRYCOLLECTION EMPTY"
        } else {
            b"GEOMETRYCOLLECTION()"
        };
        assert_eq!(d.post_process_geometry(b"GEOMETRYCOLLECTION()").as_ref(), expected);
        assert_eq!(
            d.post_process_geometry(b"GEOMETRYCOLLECTION(POINT(0 0))").as_ref(),
            b"GEOMETRYCOLLECTION(POINT(0 0))"
        );
        assert_eq!(d.post_process_geometry(b"POINT(0 0)").as_ref(), b"POINT(0 0)");
    }
}

#[test]
fn test_geometry_placeholder_uses_field_srid() {
    let field = GeometryField::new("location", GeometryType::Point);
    assert_eq!(
        mysql((5, 5, 62)).geometry_placeholder(&field),
        "GeomFromText(%s, 4326)"
    );
    assert_eq!(
        mysql((8, 0, 0)).geometry_placeholder(&field.with_srid(3857)),
        "ST_GeomFromText(%s, 3857)"
    );
}
