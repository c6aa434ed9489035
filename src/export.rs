//! File exports: the current payload as JSON and the session history as CSV.

use crate::error::{DsgenError, Result};
use crate::error_ext::ResultExt;
use crate::history::{History, HistoryEntry};
use chrono::NaiveDate;
use serde_json::Value;
use std::path::{Path, PathBuf};

pub const PAYLOAD_FILE_PREFIX: &str = "digital-sales-payload";
pub const HISTORY_FILE_PREFIX: &str = "digital-sales-history";

pub const CSV_HEADERS: [&str; 6] = [
    "timestamp",
    "applicant_name",
    "role",
    "gender",
    "marital_status",
    "payload",
];

/// A named file body, ready to be written out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub file_name: String,
    pub mime_type: &'static str,
    pub contents: String,
}

impl Download {
    pub fn save_to(&self, dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory {:?}", dir))?;
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.contents)
            .with_context(|| format!("Failed to write {:?}", path))?;
        tracing::info!(
            path = %path.display(),
            mime = self.mime_type,
            bytes = self.contents.len(),
            "Export written"
        );
        Ok(path)
    }
}

/// Two-space indented JSON, keys in the order the backend sent them.
pub fn pretty_json(payload: &Value) -> Result<String> {
    Ok(serde_json::to_string_pretty(payload)?)
}

pub fn payload_download(payload: &Value, date: NaiveDate) -> Result<Download> {
    Ok(Download {
        file_name: format!("{}-{}.json", PAYLOAD_FILE_PREFIX, date.format("%Y-%m-%d")),
        mime_type: "application/json",
        contents: pretty_json(payload)?,
    })
}

pub fn history_download(history: &History, date: NaiveDate) -> Result<Download> {
    if history.is_empty() {
        return Err(DsgenError::NoHistory);
    }

    Ok(Download {
        file_name: format!("{}-{}.csv", HISTORY_FILE_PREFIX, date.format("%Y-%m-%d")),
        mime_type: "text/csv",
        contents: history_csv(history)?,
    })
}

/// Header plus one row per entry, joined by `\n` with no trailing newline.
pub fn history_csv(history: &History) -> Result<String> {
    let mut rows = Vec::with_capacity(history.len() + 1);
    rows.push(CSV_HEADERS.join(","));

    for (i, entry) in history.iter().enumerate() {
        let row = csv_row(entry, i + 1)?;
        rows.push(
            row.iter()
                .map(|field| csv_field(field))
                .collect::<Vec<_>>()
                .join(","),
        );
    }

    Ok(rows.join("\n"))
}

fn csv_row(entry: &HistoryEntry, index: usize) -> Result<[String; 6]> {
    let applicant = first_applicant(&entry.payload).map_err(|reason| {
        DsgenError::MalformedPayload {
            index,
            reason: reason.to_string(),
        }
    })?;

    Ok([
        entry.iso_timestamp(),
        format!(
            "{} {}",
            scalar_text(applicant.get("firstName")),
            scalar_text(applicant.get("lastName"))
        ),
        scalar_text(applicant.get("role")),
        scalar_text(applicant.get("gender")),
        scalar_text(applicant.get("maritalStatus")),
        serde_json::to_string(&entry.payload)?,
    ])
}

fn first_applicant(
    payload: &Value,
) -> std::result::Result<&serde_json::Map<String, Value>, &'static str> {
    let applicants = payload
        .get("applicants")
        .ok_or("missing 'applicants'")?
        .as_array()
        .ok_or("'applicants' is not an array")?;
    applicants
        .first()
        .ok_or("'applicants' is empty")?
        .as_object()
        .ok_or("first applicant is not an object")
}

fn scalar_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Quotes a field only when it contains a comma. Quotes and newlines inside
/// the value are written as-is.
pub fn csv_field(value: &str) -> String {
    if value.contains(',') {
        format!("\"{}\"", value)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;
    use tempfile::TempDir;

    fn jane() -> Value {
        json!({
            "applicants": [{
                "firstName": "Jane",
                "lastName": "Doe",
                "role": "primary",
                "gender": "F",
                "maritalStatus": "single"
            }]
        })
    }

    fn history_of(payloads: Vec<Value>) -> History {
        let mut history = History::default();
        let ts = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();
        for payload in payloads {
            history.push(HistoryEntry::new(payload, ts));
        }
        history
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    #[test]
    fn test_payload_download_name_and_round_trip() {
        let payload = json!({
            "applicants": [{ "firstName": "Jane", "income": 42000 }],
            "status": "PENDING",
            "financialCalculation": { "rate": 5.9 }
        });

        let download = payload_download(&payload, date()).unwrap();
        assert_eq!(download.file_name, "digital-sales-payload-2024-05-01.json");
        assert_eq!(download.mime_type, "application/json");
        assert!(download.contents.contains("\n  \"applicants\""));

        let parsed: Value = serde_json::from_str(&download.contents).unwrap();
        assert_eq!(parsed, payload);
    }

    #[test]
    fn test_history_csv_row_count_and_columns() {
        let history = history_of(vec![jane(), jane(), jane()]);
        let csv = history_csv(&history).unwrap();

        let lines: Vec<&str> = csv.split('\n').collect();
        assert_eq!(lines.len(), history.len() + 1);
        assert_eq!(
            lines[0],
            "timestamp,applicant_name,role,gender,marital_status,payload"
        );
        assert!(lines[1].starts_with("2024-05-01T09:30:00.000Z,Jane Doe,primary,F,single,\""));
        assert!(!csv.ends_with('\n'));
    }

    #[test]
    fn test_comma_in_name_is_quoted() {
        let mut payload = jane();
        payload["applicants"][0]["firstName"] = json!("Jo,e");
        let csv = history_csv(&history_of(vec![payload])).unwrap();

        let row = csv.lines().nth(1).unwrap();
        assert!(row.contains(",\"Jo,e Doe\",primary,"));
    }

    #[test]
    fn test_quotes_are_not_escaped() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "say \"hi\"");
    }

    #[test]
    fn test_payload_column_is_compact_json() {
        let csv = history_csv(&history_of(vec![jane()])).unwrap();
        let row = csv.lines().nth(1).unwrap();
        let compact = serde_json::to_string(&jane()).unwrap();
        assert!(row.ends_with(&format!("\"{}\"", compact)));
    }

    #[test]
    fn test_missing_and_non_string_fields() {
        let payload = json!({ "applicants": [{ "firstName": "Sam", "role": 2, "gender": null }] });
        let csv = history_csv(&history_of(vec![payload])).unwrap();
        let row = csv.lines().nth(1).unwrap();
        assert!(row.contains(",Sam ,2,,,"));
    }

    #[test]
    fn test_malformed_payloads_are_rejected() {
        let cases = vec![
            json!({}),
            json!({ "applicants": {} }),
            json!({ "applicants": [] }),
            json!({ "applicants": ["Jane"] }),
        ];

        for bad in cases {
            let history = history_of(vec![jane(), bad]);
            match history_csv(&history) {
                Err(DsgenError::MalformedPayload { index, .. }) => assert_eq!(index, 2),
                other => panic!("Expected MalformedPayload, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_history_download_requires_entries() {
        let err = history_download(&History::default(), date()).unwrap_err();
        assert!(matches!(err, DsgenError::NoHistory));

        let download = history_download(&history_of(vec![jane()]), date()).unwrap();
        assert_eq!(download.file_name, "digital-sales-history-2024-05-01.csv");
        assert_eq!(download.mime_type, "text/csv");
    }

    #[test]
    fn test_save_to_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let out = temp_dir.path().join("exports");
        let download = payload_download(&jane(), date()).unwrap();

        let path = download.save_to(&out).unwrap();
        assert_eq!(path, out.join("digital-sales-payload-2024-05-01.json"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), download.contents);
    }
}
