use recmask_cli::{process_file, BatchError};
use recmask_core::Redactor;
use serde_json::{Map, Value};
use std::fs;

const INPUT: &str = r#"record_id,data_json
1,"{""name"": ""Ravi Kumar"", ""email"": ""ravi.kumar@example.com""}"
2,"{""device_id"": ""dev-12345678"", ""ip_address"": ""192.168.1.10""}"
3,"{""customer_id"": ""9876543210"", ""amount"": 499}"
4,"{""contact"": ""+91 9876543210"", ""notes"": ""passport J1234567""}"
"#;

fn read_rows(path: &std::path::Path) -> Vec<(String, Map<String, Value>, String)> {
    let mut reader = csv::Reader::from_path(path).unwrap();
    reader
        .records()
        .map(|r| {
            let r = r.unwrap();
            let payload: Map<String, Value> = serde_json::from_str(&r[1]).unwrap();
            (r[0].to_string(), payload, r[2].to_string())
        })
        .collect()
}

#[test]
fn test_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("records.csv");
    let output = dir.path().join("out.csv");
    fs::write(&input, INPUT).unwrap();

    let summary = process_file(&Redactor::default(), &input, &output).unwrap();
    assert_eq!(summary.rows, 4);
    assert_eq!(summary.pii_rows, 2);

    let rows = read_rows(&output);
    let ids: Vec<_> = rows.iter().map(|(id, _, _)| id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3", "4"]);

    let (_, named, flag) = &rows[0];
    assert_eq!(flag, "True");
    assert_eq!(named["name"], "RXXX KXXX");
    assert_eq!(named["email"], "ra********@example.com");

    let (_, telemetry, flag) = &rows[1];
    assert_eq!(flag, "False");
    assert_eq!(telemetry["device_id"], "dev-12345678");
    assert_eq!(telemetry["ip_address"], "192.168.1.10");

    let (_, order, flag) = &rows[2];
    assert_eq!(flag, "False");
    assert_eq!(order["customer_id"], "9876543210");
    assert_eq!(order["amount"], 499);

    let (_, contact, flag) = &rows[3];
    assert_eq!(flag, "True");
    assert_eq!(contact["contact"], "98XXXXXX10");
    assert_eq!(contact["notes"], "passport JXXXXXX7");
}

#[test]
fn test_missing_input_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = process_file(
        &Redactor::default(),
        &dir.path().join("absent.csv"),
        &dir.path().join("out.csv"),
    )
    .unwrap_err();
    assert!(matches!(err, BatchError::OpenInput { .. }));
}

#[test]
fn test_missing_columns_reported_once() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("records.csv");
    fs::write(&input, "id,json\n1,{}\n").unwrap();
    let err = process_file(&Redactor::default(), &input, &dir.path().join("out.csv")).unwrap_err();
    assert!(err.to_string().starts_with("input CSV must have columns"));
}

#[test]
fn test_failed_run_keeps_existing_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("records.csv");
    let output = dir.path().join("out.csv");
    fs::write(&input, "id,json\n1,{}\n").unwrap();
    fs::write(&output, "previous results\n").unwrap();

    let err = process_file(&Redactor::default(), &input, &output).unwrap_err();
    assert!(matches!(err, BatchError::MissingColumns { .. }));
    assert_eq!(fs::read_to_string(&output).unwrap(), "previous results\n");
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);
}

#[test]
fn test_in_place_run_redacts_input() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("records.csv");
    fs::write(&path, INPUT).unwrap();

    let summary = process_file(&Redactor::default(), &path, &path).unwrap();
    assert_eq!(summary.rows, 4);

    let rows = read_rows(&path);
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[3].1["contact"], "98XXXXXX10");
    let header = fs::read_to_string(&path).unwrap();
    assert!(header.starts_with("record_id,redacted_data_json,is_pii\n"));
}
