//! Integration tests for connection settings and output rendering.

use std::io::Write;

use qaaws_cli::output::render_table;
use qaaws_cli::settings::{ConnectionOverrides, parse_param, resolve_config};
use qaaws_model::{Record, Table};

#[test]
fn test_parse_param() {
    assert_eq!(
        parse_param("Team=Mets;Yankees").unwrap(),
        ("Team".to_string(), "Mets;Yankees".to_string())
    );
    assert_eq!(
        parse_param("Filter=a=b").unwrap(),
        ("Filter".to_string(), "a=b".to_string())
    );
    assert_eq!(parse_param("Empty=").unwrap(), ("Empty".to_string(), String::new()));
    assert!(parse_param("Team").is_err());
    assert!(parse_param("=Mets").is_err());
}

#[test]
fn test_config_file_with_overrides() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"endpoint = "http://bo.example.com/qaaws"
cuid = "AbC123"
username = "reader"
password = "from-file"
timeout_secs = 30"#
    )
    .unwrap();

    let overrides = ConnectionOverrides {
        password: Some("from-flag".to_string()),
        timeout_secs: Some(5),
        ..Default::default()
    };
    let config = resolve_config(Some(file.path()), &overrides).unwrap();
    assert_eq!(config.endpoint, "http://bo.example.com/qaaws");
    assert_eq!(config.username.as_deref(), Some("reader"));
    assert_eq!(config.password.as_deref(), Some("from-flag"));
    assert_eq!(config.timeout_secs, 5);
    assert!(config.validate().is_ok());
}

#[test]
fn test_flags_only() {
    let overrides = ConnectionOverrides {
        endpoint: Some("http://host/qaaws".to_string()),
        cuid: Some("AbC123".to_string()),
        serialized_session: Some("token".to_string()),
        ..Default::default()
    };
    let config = resolve_config(None, &overrides).unwrap();
    assert_eq!(config.wsdl_location(), "http://host/qaaws?wsdl=1&cuid=AbC123");
    assert_eq!(config.timeout_secs, 60);
}

#[test]
fn test_unreadable_config_names_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.toml");
    let err = resolve_config(Some(path.as_path()), &ConnectionOverrides::default()).unwrap_err();
    assert!(format!("{err:#}").contains("missing.toml"));

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "timeout_secs = \"soon\"").unwrap();
    let err = resolve_config(Some(file.path()), &ConnectionOverrides::default()).unwrap_err();
    assert!(format!("{err:#}").contains("parse config file"));
}

#[test]
fn test_render_table_shows_nulls_empty() {
    let table = Table::new(vec![
        Record::new().with("Team", Some("Mets")).with("City", None),
        Record::new().with("Team", Some("Yankees")).with("City", Some("New York")),
    ]);
    let rendered = render_table(&table).to_string();
    assert!(rendered.contains("Team"));
    assert!(rendered.contains("City"));
    assert!(rendered.contains("Yankees"));
    assert!(rendered.contains("New York"));
    assert!(!rendered.contains("null"));
}
