//! CSV batch ingestion and output.
//!
//! Input needs a `record_id` column and a payload column (`data_json`, or
//! `data`), matched case-insensitively. Output always has exactly
//! `record_id,redacted_data_json,is_pii`.

use crate::error::{BatchError, Result};
use csv::{ReaderBuilder, StringRecord, Writer};
use recmask_core::{parse_payload, PayloadSource, Redactor};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Fixed output file name, written to the working directory.
pub const OUTPUT_FILE: &str = "redacted_records.csv";

pub const ID_COLUMN: &str = "record_id";
pub const PAYLOAD_COLUMNS: [&str; 2] = ["data_json", "data"];
pub const OUTPUT_HEADER: [&str; 3] = ["record_id", "redacted_data_json", "is_pii"];

/// Counters reported after a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub rows: usize,
    pub pii_rows: usize,
    pub repaired_payloads: usize,
    pub raw_payloads: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Columns {
    record_id: usize,
    payload: usize,
}

fn locate_columns(headers: &StringRecord) -> Result<Columns> {
    let position = |name: &str| headers.iter().position(|h| h.trim().eq_ignore_ascii_case(name));

    let record_id = position(ID_COLUMN);
    let payload = PAYLOAD_COLUMNS.iter().find_map(|&name| position(name));
    match (record_id, payload) {
        (Some(record_id), Some(payload)) => Ok(Columns { record_id, payload }),
        _ => Err(BatchError::MissingColumns {
            found: headers.iter().map(str::to_string).collect(),
        }),
    }
}

/// Redact every row of `input` into `output`.
pub fn process<R: Read, W: Write>(redactor: &Redactor, input: R, output: W) -> Result<BatchSummary> {
    let mut reader = ReaderBuilder::new().flexible(true).from_reader(input);
    let columns = locate_columns(reader.headers()?)?;

    let mut writer = Writer::from_writer(output);
    writer.write_record(OUTPUT_HEADER)?;

    let mut summary = BatchSummary::default();
    for row in reader.records() {
        let row = row?;
        let record_id = row.get(columns.record_id).unwrap_or_default();
        let raw = row.get(columns.payload).unwrap_or_default();

        let (record, source) = parse_payload(raw);
        match source {
            PayloadSource::Parsed => {}
            PayloadSource::Repaired => summary.repaired_payloads += 1,
            PayloadSource::Raw => {
                tracing::warn!(record_id, "payload is not a JSON object, kept raw");
                summary.raw_payloads += 1;
            }
        }

        let verdict = redactor.redact(&record);
        let encoded = serde_json::to_string(&verdict.redacted).map_err(|source| BatchError::Encode {
            record_id: record_id.to_string(),
            source,
        })?;
        writer.write_record([record_id, encoded.as_str(), pii_flag(verdict.is_pii)])?;

        tracing::debug!(record_id, is_pii = verdict.is_pii, "row redacted");
        summary.rows += 1;
        summary.pii_rows += usize::from(verdict.is_pii);
    }
    writer.flush()?;

    tracing::info!(
        rows = summary.rows,
        pii_rows = summary.pii_rows,
        repaired = summary.repaired_payloads,
        raw = summary.raw_payloads,
        "batch complete"
    );
    Ok(summary)
}

/// File-to-file variant of [`process`].
///
/// Rows go to a temporary file next to `output`, which replaces `output` only
/// once the whole batch succeeded. A failed run leaves any existing output
/// untouched, and `input` may be the same path as `output`.
pub fn process_file(redactor: &Redactor, input: &Path, output: &Path) -> Result<BatchSummary> {
    let reader = File::open(input).map_err(|source| BatchError::OpenInput {
        path: input.to_path_buf(),
        source,
    })?;
    let dir = output
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let create_err = |source: std::io::Error| BatchError::CreateOutput {
        path: output.to_path_buf(),
        source,
    };
    let mut staged = NamedTempFile::new_in(dir).map_err(create_err)?;

    let summary = process(redactor, reader, &mut staged)?;
    staged.persist(output).map_err(|err| create_err(err.error))?;
    Ok(summary)
}

fn pii_flag(is_pii: bool) -> &'static str {
    if is_pii {
        "True"
    } else {
        "False"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn run(input: &str) -> (BatchSummary, Vec<Vec<String>>) {
        let mut out = Vec::new();
        let summary = process(&Redactor::default(), input.as_bytes(), &mut out).unwrap();
        let mut reader = csv::Reader::from_reader(out.as_slice());
        assert_eq!(reader.headers().unwrap(), &StringRecord::from(OUTPUT_HEADER.to_vec()));
        let rows = reader
            .records()
            .map(|r| r.unwrap().iter().map(str::to_string).collect())
            .collect();
        (summary, rows)
    }

    #[test]
    fn test_columns_matched_case_insensitively() {
        let headers = StringRecord::from(vec!["Record_ID", "extra", "DATA"]);
        assert_eq!(
            locate_columns(&headers).unwrap(),
            Columns { record_id: 0, payload: 2 }
        );
    }

    #[test]
    fn test_data_json_preferred_over_data() {
        let headers = StringRecord::from(vec!["data", "record_id", "data_json"]);
        assert_eq!(locate_columns(&headers).unwrap().payload, 2);
    }

    #[test]
    fn test_missing_columns_is_fatal() {
        let mut out = Vec::new();
        let err = process(&Redactor::default(), "id,payload\n1,{}\n".as_bytes(), &mut out).unwrap_err();
        assert!(matches!(err, BatchError::MissingColumns { .. }));
        assert!(err.to_string().contains("found: id, payload"));
        assert!(out.is_empty(), "nothing may be written before columns are validated");
    }

    #[test]
    fn test_rows_redacted_and_ids_preserved() {
        let input = "record_id,data_json\n\
                     7,\"{\"\"phone\"\": \"\"9876543210\"\"}\"\n\
                     008,\"{\"\"city\"\": \"\"Pune\"\"}\"\n";
        let (summary, rows) = run(input);
        assert_eq!(summary.rows, 2);
        assert_eq!(summary.pii_rows, 1);

        assert_eq!(rows[0][0], "7");
        assert_eq!(rows[0][1], r#"{"phone":"98XXXXXX10"}"#);
        assert_eq!(rows[0][2], "True");

        assert_eq!(rows[1][0], "008");
        assert_eq!(rows[1][1], r#"{"city":"Pune"}"#);
        assert_eq!(rows[1][2], "False");
    }

    #[test]
    fn test_malformed_payloads_recovered_per_row() {
        let input = "record_id,data\n\
                     1,\"{'name': 'Ravi Kumar', 'email': 'ravi.kumar@example.com'}\"\n\
                     2,not json\n";
        let (summary, rows) = run(input);
        assert_eq!(summary.repaired_payloads, 1);
        assert_eq!(summary.raw_payloads, 1);

        let first: Value = serde_json::from_str(&rows[0][1]).unwrap();
        assert_eq!(first["name"], "RXXX KXXX");
        assert_eq!(rows[0][2], "True");

        let second: Value = serde_json::from_str(&rows[1][1]).unwrap();
        assert_eq!(second["__raw__"], "not json");
        assert_eq!(rows[1][2], "False");
    }

    #[test]
    fn test_output_payload_keeps_input_keys() {
        let input = "record_id,data_json\n\
                     a1,\"{\"\"z\"\": 1, \"\"aadhar\"\": \"\"1234 5678 9012\"\", \"\"b\"\": [1]}\"\n";
        let (_, rows) = run(input);
        let payload: serde_json::Map<String, Value> = serde_json::from_str(&rows[0][1]).unwrap();
        let keys: Vec<_> = payload.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["z", "aadhar", "b"]);
        assert_eq!(payload["aadhar"], "XXXX-XXXX-XXXX");
    }

    #[test]
    fn test_non_ascii_kept_verbatim() {
        let input = "record_id,data_json\n1,\"{\"\"city\"\": \"\"बेंगलुरु\"\"}\"\n";
        let (_, rows) = run(input);
        assert_eq!(rows[0][1], r#"{"city":"बेंगलुरु"}"#);
    }
}
