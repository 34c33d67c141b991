use aggsql::spec::{load_spec, LoadError};
use std::io::Write;
use tempfile::NamedTempFile;

fn spec_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_spec_file() {
    let file = spec_file(
        r#"{
            "TABLE_NAME": "proj.ds.investments",
            "GROUP_BY": [{"Field": "category"}],
            "VALUES": [{"Field": "round", "Operation": "COUNT"}]
        }"#,
    );

    let spec = load_spec(file.path()).unwrap();
    assert_eq!(spec["TABLE_NAME"], "proj.ds.investments");
    assert!(spec["GROUP_BY"].is_array());
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");

    let err = load_spec(&path).unwrap_err();
    assert!(matches!(err, LoadError::Read { .. }));
    assert!(err.to_string().contains("absent.json"));
}

#[test]
fn test_load_invalid_json() {
    let file = spec_file("{\"TABLE_NAME\": ");

    let err = load_spec(file.path()).unwrap_err();
    assert!(matches!(err, LoadError::Parse { .. }));
}

#[test]
fn test_load_non_object() {
    let file = spec_file("\"TABLE_NAME\"");

    let err = load_spec(file.path()).unwrap_err();
    assert!(matches!(err, LoadError::NotAnObject { .. }));
}
