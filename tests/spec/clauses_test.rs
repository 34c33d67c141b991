use aggsql::spec::{
    DateBucket, GroupByClauses, QueryRecord, Schema, SchemaError, SortDirection, ValueClauses,
};
use serde_json::json;

fn record(value: serde_json::Value) -> QueryRecord {
    QueryRecord::validate(&value).unwrap()
}

#[test]
fn test_group_by_clauses_from_record() {
    let record = record(json!({
        "TABLE_NAME": "t",
        "GROUP_BY": [
            {"Field": "created_at", "DateAggregation": "MONTH", "Alias": "month"},
            {"Field": "category", "SortDirection": "asc", "Limit": 5, "Sort": "n"}
        ]
    }));
    let clauses = GroupByClauses::from_raw(record.group_by.as_deref());

    assert_eq!(clauses.len(), 2);
    let first = clauses.get(0).unwrap();
    assert_eq!(first.aggregation, Some(DateBucket::Month));
    assert_eq!(first.alias.as_deref(), Some("month"));

    let second = clauses.get(1).unwrap();
    assert_eq!(second.direction, Some(SortDirection::Asc));
    assert_eq!(second.limit, Some(5));
    assert_eq!(second.sort.as_deref(), Some("n"));
}

#[test]
fn test_value_clauses_skip_bad_entries() {
    let record = record(json!({
        "TABLE_NAME": "t",
        "VALUES": [
            {"Field": "a", "Operation": "SUM"},
            {"Field": "b", "ArrayLimit": "ten"},
            {"Field": null, "Operation": "MAX"},
            {"Field": "d", "Operation": "MIN"}
        ]
    }));
    let clauses = ValueClauses::from_raw(record.values.as_deref());

    let fields: Vec<_> = clauses.iter().map(|v| v.field.as_str()).collect();
    assert_eq!(fields, vec!["a", "d"]);

    let positions: Vec<_> = clauses
        .clauses()
        .iter()
        .map(|c| (c.position, c.source_index))
        .collect();
    assert_eq!(positions, vec![(0, 0), (1, 3)]);

    let skipped = clauses.skipped();
    assert_eq!(skipped.len(), 2);
    assert!(matches!(
        skipped[0].error,
        SchemaError::InvalidType {
            field: "ArrayLimit",
            ..
        }
    ));
    assert_eq!(skipped[1].error.missing_field(), Some("Field"));
}

#[test]
fn test_empty_arrays() {
    let record = record(json!({"TABLE_NAME": "t", "GROUP_BY": [], "VALUES": null}));

    assert!(GroupByClauses::from_raw(record.group_by.as_deref()).is_empty());
    assert!(ValueClauses::from_raw(record.values.as_deref()).is_empty());
}

#[test]
fn test_query_level_errors_are_fatal() {
    let err = QueryRecord::validate(&json!({"TABLE_NAME": "t", "TOTAL_LIMIT": "5"})).unwrap_err();
    assert!(matches!(
        err,
        SchemaError::InvalidType {
            field: "TOTAL_LIMIT",
            ..
        }
    ));

    let err = QueryRecord::validate(&json!({"TABLE_NAME": "t", "OFFSET": -1})).unwrap_err();
    assert!(matches!(err, SchemaError::InvalidType { field: "OFFSET", .. }));
}
