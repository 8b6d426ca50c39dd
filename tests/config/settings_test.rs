//! Loading connection settings from a config file.

use std::io::Write;

use mantis_gis::config::{Settings, SettingsError};
use mantis_gis::prelude::*;

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_open_connection_from_file() {
    let file = write_config(
        r#"
[connections.legacy]
driver = "mysql"
server_version = "5.5.62-log"

[connections.prod]
driver = "mysql"
server_version = "8.0.32"
"#,
    );

    let settings = Settings::from_file(file.path()).unwrap();

    let legacy = settings.get_connection("legacy").unwrap().open().unwrap();
    assert_eq!(legacy.server_version(), ServerVersion::new(5, 5, 62));
    assert_eq!(legacy.ops().resolve_function_name("Length").unwrap(), "GLength");

    let prod = settings.get_connection("prod").unwrap().open().unwrap();
    assert_eq!(prod.ops().predicate_function("exact").unwrap(), "MBREquals");
}

#[test]
fn test_env_expanded_version() {
    std::env::set_var("MANTIS_GIS_SETTINGS_TEST_VERSION", "5.7.5");
    let file = write_config(
        r#"
[connections.default]
driver = "mariadb"
server_version = "${MANTIS_GIS_SETTINGS_TEST_VERSION}"
"#,
    );

    let settings = Settings::from_file(file.path()).unwrap();
    let (name, conn) = settings.default_connection().unwrap();
    assert_eq!(name, "default");

    let spatial = conn.open().unwrap();
    assert!(spatial.ops().flags().accepts_invalid_empty_collection_literal);
    std::env::remove_var("MANTIS_GIS_SETTINGS_TEST_VERSION");
}

#[test]
fn test_invalid_version_in_file() {
    let file = write_config(
        r#"
[connections.broken]
driver = "mysql"
server_version = "latest"
"#,
    );

    let settings = Settings::from_file(file.path()).unwrap();
    let err = settings.get_connection("broken").unwrap().open().unwrap_err();
    assert!(matches!(err, SettingsError::Gis(GisError::InvalidVersion(_))));
}

#[test]
fn test_missing_file() {
    let err = Settings::from_file("/nonexistent/mantis-gis.toml").unwrap_err();
    assert!(matches!(err, SettingsError::FileNotFound(_)));
}

#[test]
fn test_malformed_file() {
    let file = write_config("[connections.x\ndriver = ");
    assert!(matches!(
        Settings::from_file(file.path()),
        Err(SettingsError::ParseError(_))
    ));
}

#[test]
fn test_configured_default_srid() {
    let file = write_config(
        r#"
[connections.default]
driver = "mysql"
server_version = "8.0.32"

[gis]
default_srid = 3857
"#,
    );

    let settings = Settings::from_file(file.path()).unwrap();
    let (_, conn) = settings.default_connection().unwrap();
    let spatial = settings.open(conn).unwrap();

    let field = spatial.geometry_field("geom", GeometryType::Point);
    assert_eq!(field.srid, 3857);
    assert!(!field.geodetic());
    assert_eq!(
        spatial.ops().geometry_placeholder(&field),
        "ST_GeomFromText(%s, 3857)"
    );
}
