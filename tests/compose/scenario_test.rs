//! End-to-end scenarios over complete query specs.

use aggsql::compose::{ComposeError, Composer};
use aggsql::spec::SchemaError;

#[test]
fn test_count_by_category() {
    let composer = Composer::from_json_str(
        r#"{"TABLE_NAME":"t","GROUP_BY":[{"Field":"category"}],"VALUES":[{"Field":"round","Operation":"COUNT"}],"TOTAL_LIMIT":5}"#,
    )
    .unwrap();

    assert_eq!(
        composer.build_query(),
        "SELECT category, COUNT(round) FROM `t` GROUP BY category LIMIT 5"
    );
}

#[test]
fn test_unsupported_operation() {
    let err = Composer::from_json_str(
        r#"{"TABLE_NAME":"t","VALUES":[{"Field":"x","Operation":"BOGUS"}]}"#,
    )
    .unwrap_err();

    assert!(matches!(err, ComposeError::Function(_)));
    assert_eq!(err.unsupported_function(), Some("BOGUS"));
}

#[test]
fn test_missing_table_name() {
    let err = Composer::from_json_str(r#"{"GROUP_BY":[{"Field":"category"}]}"#).unwrap_err();

    assert_eq!(err.missing_field(), Some("TABLE_NAME"));
    assert!(matches!(
        err,
        ComposeError::Schema(SchemaError::MissingField { .. })
    ));
}

#[test]
fn test_empty_table_name() {
    let err = Composer::from_json_str(r#"{"TABLE_NAME":"  "}"#).unwrap_err();
    assert!(matches!(
        err,
        ComposeError::Schema(SchemaError::EmptyField { .. })
    ));
}

#[test]
fn test_build_twice_is_identical() {
    let composer = Composer::from_json_str(
        r#"{
            "TABLE_NAME": "t",
            "GROUP_BY": [{"Field": "a", "Alias": "x"}, {"Field": "b"}],
            "VALUES": [
                {"Field": "c", "Operation": "ARRAY_AGG", "Order": "c", "ArrayLimit": 2},
                {"Field": "d", "Operation": "AVG"}
            ],
            "TOTAL_LIMIT": 10,
            "OFFSET": 30
        }"#,
    )
    .unwrap();

    let first = composer.build_query();
    let second = composer.build_query();
    assert_eq!(first, second);
    assert_eq!(
        first,
        "SELECT a AS x, b, ARRAY_AGG(c ORDER BY c LIMIT 2), AVG(d) FROM `t` GROUP BY a, b LIMIT 10 OFFSET 30"
    );
}

#[test]
fn test_invalid_entry_does_not_block_others() {
    let composer = Composer::from_json_str(
        r#"{
            "TABLE_NAME": "t",
            "GROUP_BY": [{"Field": "category"}, {"Alias": "broken"}, {"Field": "region"}],
            "VALUES": [{"Field": "round", "Operation": "COUNT"}]
        }"#,
    )
    .unwrap();

    assert_eq!(
        composer.build_query(),
        "SELECT category, region, COUNT(round) FROM `t` GROUP BY category, region"
    );
    let skipped = composer.group_by_clauses().skipped();
    assert_eq!(skipped.len(), 1);
    assert_eq!(skipped[0].source_index, 1);
}

#[test]
fn test_limit_and_offset_presence() {
    let no_paging =
        Composer::from_json_str(r#"{"TABLE_NAME":"t","GROUP_BY":[{"Field":"a"}]}"#).unwrap();
    assert_eq!(no_paging.build_query(), "SELECT a FROM `t` GROUP BY a");

    let offset_only = Composer::from_json_str(
        r#"{"TABLE_NAME":"t","GROUP_BY":[{"Field":"a"}],"OFFSET":15}"#,
    )
    .unwrap();
    assert_eq!(offset_only.build_query(), "SELECT a FROM `t` GROUP BY a OFFSET 15");
}
