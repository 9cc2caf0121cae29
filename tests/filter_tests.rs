// tests/filter_tests.rs
//
// End-to-end: query string -> criteria -> filter document -> record
// selection through the in-memory evaluator.

use serde_json::{json, Value};

use runq::{evaluator, parse_and_compile, FieldRegistry};

fn run(id: &str, distance: f64, duration: i64, start_date: &str) -> Value {
    json!({
        "id": { "$oid": id },
        "distance": distance,
        "duration": duration,
        "startDate": start_date,
    })
}

fn dataset() -> Vec<Value> {
    vec![
        run("507f1f77bcf86cd799439011", 4200.0, 1200, "2020-06-11T08:30:00"),
        run("507f1f77bcf86cd799439012", 3000.0, 1500, "2020-07-01T06:15:00"),
        run("507f1f77bcf86cd799439013", 2400.0, 1100, "2020-05-02T07:00:00"),
        run("507f1f77bcf86cd799439014", 4500.0, 800, "2020-08-20T18:45:00"),
        run("507f1f77bcf86cd799439015", 2400.0, 1100, "2020-04-30T07:00:00"),
    ]
}

fn selected_ids(query: &str) -> Vec<String> {
    let fields = FieldRegistry::default();
    let filter = parse_and_compile(&fields, query).unwrap();
    let records = dataset();
    evaluator::select(&filter, &records)
        .iter()
        .map(|r| r["id"]["$oid"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn test_compiled_filter_document_shape() {
    let fields = FieldRegistry::default();
    let filter =
        parse_and_compile(&fields, "(duration gt 1000) AND (distance lt 2500)").unwrap();
    assert_eq!(
        filter,
        json!({ "$and": [
            { "duration": { "$gt": 1000 } },
            { "distance": { "$lt": 2500.0 } },
        ] })
    );
}

#[test]
fn test_selection_matches_the_denoted_predicate() {
    let query = "(startDate gt 2020-05-01T00:00:00) AND (((distance gt 4100) OR (distance lt 2500)) AND (duration gt 1000))";
    let ids = selected_ids(query);

    // Same predicate, written out by hand over the dataset.
    let expected: Vec<String> = dataset()
        .iter()
        .filter(|r| {
            let distance = r["distance"].as_f64().unwrap();
            let duration = r["duration"].as_i64().unwrap();
            let start = r["startDate"].as_str().unwrap();
            start > "2020-05-01T00:00:00"
                && (distance > 4100.0 || distance < 2500.0)
                && duration > 1000
        })
        .map(|r| r["id"]["$oid"].as_str().unwrap().to_string())
        .collect();

    assert_eq!(ids, expected);
    assert_eq!(
        ids,
        vec!["507f1f77bcf86cd799439011", "507f1f77bcf86cd799439013"]
    );
}

#[test]
fn test_equivalent_expressions_select_the_same_records() {
    // AND binds tighter than OR, so these three denote one predicate even
    // though their ASTs differ in shape.
    let a = selected_ids("(distance gt 4100) OR (distance lt 2500) AND (duration gt 1000)");
    let b = selected_ids("(distance gt 4100) OR ((distance lt 2500) AND (duration gt 1000))");
    let c = selected_ids("((distance lt 2500) AND (duration gt 1000)) OR (distance gt 4100)");

    assert_eq!(a, b);
    assert_eq!(a, c);
}

#[test]
fn test_equality_on_object_id() {
    let ids = selected_ids("(id eq 507f1f77bcf86cd799439014)");
    assert_eq!(ids, vec!["507f1f77bcf86cd799439014"]);
}

#[test]
fn test_not_equal() {
    let ids = selected_ids("(duration ne 1100)");
    assert_eq!(
        ids,
        vec![
            "507f1f77bcf86cd799439011",
            "507f1f77bcf86cd799439012",
            "507f1f77bcf86cd799439014",
        ]
    );
}

#[test]
fn test_date_boundaries() {
    let ids = selected_ids("(startDate lt 2020-05-01T00:00:00)");
    assert_eq!(ids, vec!["507f1f77bcf86cd799439015"]);
}

#[test]
fn test_parse_errors_surface_through_the_boundary() {
    let fields = FieldRegistry::default();
    let err = parse_and_compile(&fields, "(pace gt 5)").unwrap_err();
    assert_eq!(err.to_string(), "unknown query field: 'pace'");
}

#[test]
fn test_concurrent_parses_share_one_registry() {
    let fields = std::sync::Arc::new(FieldRegistry::default());
    let query = "(duration gt 1000) AND (distance lt 2500)";

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let fields = std::sync::Arc::clone(&fields);
            std::thread::spawn(move || parse_and_compile(&fields, query).unwrap())
        })
        .collect();

    let first = parse_and_compile(&fields, query).unwrap();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), first);
    }
}
