use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::config::CSV_MIME_TYPE;
use crate::env::{DownloadError, Downloader};

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("row {index} could not be serialized: {source}")]
    Serialize {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("row {0} is not a record with named fields")]
    NotARecord(usize),
    #[error(transparent)]
    Download(#[from] DownloadError),
}

/// Builds CSV text from a list of records.
///
/// The header is the first record's field names, in order. Every field is
/// wrapped in double quotes and embedded quotes become `\"`; commas and line
/// breaks inside a field are left as they are. Rows are joined with `\n`.
/// An empty list produces an empty string.
pub fn convert_to_csv<T: Serialize>(rows: &[T]) -> Result<String, ExportError> {
    let records = rows
        .iter()
        .enumerate()
        .map(|(index, row)| match serde_json::to_value(row) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(ExportError::NotARecord(index)),
            Err(source) => Err(ExportError::Serialize { index, source }),
        })
        .collect::<Result<Vec<_>, _>>()?;

    let Some(first) = records.first() else {
        return Ok(String::new());
    };

    let headers: Vec<&String> = first.keys().collect();
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(
        headers
            .iter()
            .map(|h| h.as_str())
            .collect::<Vec<_>>()
            .join(","),
    );

    for record in &records {
        let fields: Vec<String> = headers
            .iter()
            .map(|header| {
                let raw = record.get(header.as_str()).map(field_text).unwrap_or_default();
                format!("\"{}\"", raw.replace('"', "\\\""))
            })
            .collect();
        lines.push(fields.join(","));
    }

    Ok(lines.join("\n"))
}

/// Text of a single field as it appears between the quotes.
fn field_text(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::String(s) => s.clone(),
        Value::Number(n) => match (n.as_u64(), n.as_i64(), n.as_f64()) {
            (Some(u), _, _) => u.to_string(),
            (None, Some(i), _) => i.to_string(),
            (None, None, Some(f)) => f.to_string(),
            _ => n.to_string(),
        },
        other => other.to_string(),
    }
}

/// Converts `rows` to CSV and hands the result to `downloader` as `filename`.
pub fn to_csv<T, D>(downloader: &D, rows: &[T], filename: &str) -> Result<(), ExportError>
where
    T: Serialize,
    D: Downloader + ?Sized,
{
    let csv = convert_to_csv(rows)?;
    downloader.download(filename, CSV_MIME_TYPE, &csv)?;
    info!(filename, rows = rows.len(), "exported CSV");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn escapes_quotes_with_backslash() {
        let rows = vec![json!({"name": "A", "note": "say \"hi\""})];
        let csv = convert_to_csv(&rows).unwrap();
        assert_eq!(csv, "name,note\n\"A\",\"say \\\"hi\\\"\"");
    }

    #[test]
    fn commas_and_newlines_are_only_wrapped() {
        let rows = vec![json!({"crop": "rice, paddy", "note": "line1\nline2"})];
        let csv = convert_to_csv(&rows).unwrap();
        assert_eq!(csv, "crop,note\n\"rice, paddy\",\"line1\nline2\"");
    }

    #[test]
    fn empty_input_gives_empty_text() {
        let rows: Vec<Value> = Vec::new();
        assert_eq!(convert_to_csv(&rows).unwrap(), "");
    }

    #[test]
    fn header_comes_from_first_record_only() {
        let rows = vec![
            json!({"crop": "rice", "count": 3}),
            json!({"count": 1, "crop": "maize", "extra": true}),
            json!({"crop": "wheat"}),
        ];
        let csv = convert_to_csv(&rows).unwrap();
        assert_eq!(
            csv,
            "crop,count\n\"rice\",\"3\"\n\"maize\",\"1\"\n\"wheat\",\"\""
        );
    }

    #[test]
    fn scalars_render_like_plain_text() {
        let rows = vec![json!({"n": 90.0, "ph": 6.5, "lat": null, "ok": false, "delta": -2})];
        let csv = convert_to_csv(&rows).unwrap();
        assert_eq!(csv, "n,ph,lat,ok,delta\n\"90\",\"6.5\",\"null\",\"false\",\"-2\"");
    }

    #[test]
    fn non_record_rows_are_rejected() {
        let rows = vec![json!({"a": 1}), json!(5)];
        assert!(matches!(
            convert_to_csv(&rows),
            Err(ExportError::NotARecord(1))
        ));
    }
}
