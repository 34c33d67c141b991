use aggsql::compose::{ComposeError, Composer};
use aggsql::sql::Dialect;
use insta::assert_snapshot;
use serde_json::json;
use std::io::Write;

#[test]
fn test_compose_from_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "TABLE_NAME": "proj.ds.investments",
            "GROUP_BY": [{{"Field": "category", "Alias": "cat"}}],
            "VALUES": [
                {{"Field": "round", "Operation": "COUNT", "Alias": "rounds"}},
                {{"Field": "amount", "Operation": "SUM", "Alias": "total"}}
            ],
            "TOTAL_LIMIT": 100
        }}"#
    )
    .unwrap();

    let composer = Composer::from_path(file.path()).unwrap();
    assert_eq!(composer.table(), "proj.ds.investments");
    assert_eq!(composer.limit(), Some(100));
    assert_eq!(composer.offset(), None);
    assert_eq!(composer.dialect(), Dialect::BigQuery);

    assert_snapshot!(
        composer.build_query(),
        @"SELECT category AS cat, COUNT(round) AS rounds, SUM(amount) AS total FROM `proj.ds.investments` GROUP BY category LIMIT 100"
    );
}

#[test]
fn test_compose_from_missing_path() {
    let err = Composer::from_path("/nonexistent/spec.json").unwrap_err();
    assert!(matches!(err, ComposeError::Load(_)));
}

#[test]
fn test_compose_from_invalid_json() {
    let err = Composer::from_json_str("{\"TABLE_NAME\": \"t\"").unwrap_err();
    assert!(matches!(err, ComposeError::Load(_)));
}

#[test]
fn test_multiple_dimensions_keep_order() {
    let composer = Composer::from_value(&json!({
        "TABLE_NAME": "t",
        "GROUP_BY": [
            {"Field": "country"},
            {"Field": "city", "Alias": "town"},
            {"Field": "year"}
        ],
        "VALUES": [{"Field": "id", "Operation": "COUNT", "Modifier": "DISTINCT", "Alias": "n"}]
    }))
    .unwrap();

    assert_snapshot!(
        composer.build_query(),
        @"SELECT country, city AS town, year, COUNT(DISTINCT id) AS n FROM `t` GROUP BY country, city, year"
    );
    assert_eq!(composer.group_by_clauses().len(), 3);
    assert_eq!(composer.value_clauses().len(), 1);
}

#[test]
fn test_alias_collision_is_renamed() {
    let composer = Composer::from_value(&json!({
        "TABLE_NAME": "t",
        "VALUES": [
            {"Field": "a", "Operation": "SUM", "Alias": "total"},
            {"Field": "b", "Operation": "SUM", "Alias": "total"}
        ]
    }))
    .unwrap();

    assert_snapshot!(
        composer.build_query(),
        @"SELECT SUM(a) AS total, SUM(b) AS total_1 FROM `t`"
    );
}

#[test]
fn test_renamed_alias_does_not_reuse_explicit_alias() {
    let composer = Composer::from_value(&json!({
        "TABLE_NAME": "t",
        "VALUES": [
            {"Field": "a", "Operation": "SUM", "Alias": "total"},
            {"Field": "b", "Operation": "SUM", "Alias": "total_2"},
            {"Field": "c", "Operation": "SUM", "Alias": "total"}
        ]
    }))
    .unwrap();

    assert_snapshot!(
        composer.build_query(),
        @"SELECT SUM(a) AS total, SUM(b) AS total_2, SUM(c) AS total_2_1 FROM `t`"
    );
}

#[test]
fn test_dialect_switch_only_changes_table_quoting() {
    let spec = json!({
        "TABLE_NAME": "events",
        "GROUP_BY": [{"Field": "kind"}],
        "TOTAL_LIMIT": 3,
        "OFFSET": 6
    });
    let bigquery = Composer::from_value(&spec).unwrap();
    let duckdb = Composer::from_value(&spec).unwrap().with_dialect(Dialect::DuckDb);

    assert_eq!(
        bigquery.build_query().replace('`', "\""),
        duckdb.build_query()
    );
}

#[test]
fn test_unknown_keys_are_ignored() {
    let composer = Composer::from_value(&json!({
        "TABLE_NAME": "t",
        "FILTERS": [{"Field": "x", "Operand": "="}],
        "SEARCH": "abc",
        "GROUP_BY": [{"Field": "x", "Extra": 1}]
    }))
    .unwrap();

    assert_snapshot!(composer.build_query(), @"SELECT x FROM `t` GROUP BY x");
}
