//! CSV export of prediction history through a `Downloader`.

use std::cell::RefCell;

use chrono::NaiveDate;
use serde_json::json;

use crop_dashboard::env::{DownloadError, Downloader};
use crop_dashboard::export::{to_csv, ExportError};
use crop_dashboard::{PredictionRecord, CSV_FILENAME};

#[derive(Default)]
struct RecordingDownloader {
    files: RefCell<Vec<(String, String, String)>>,
    fail: bool,
}

impl Downloader for RecordingDownloader {
    fn download(&self, filename: &str, mime_type: &str, contents: &str) -> Result<(), DownloadError> {
        if self.fail {
            return Err(DownloadError {
                filename: filename.to_string(),
                reason: "blocked by browser".to_string(),
            });
        }
        self.files.borrow_mut().push((
            filename.to_string(),
            mime_type.to_string(),
            contents.to_string(),
        ));
        Ok(())
    }
}

fn record(id: u64, crop: &str, name: Option<&str>) -> PredictionRecord {
    PredictionRecord {
        id,
        nitrogen: 90.0,
        phosphorus: 42.0,
        potassium: 43.0,
        temperature: 20.5,
        humidity: 82.0,
        ph: 6.5,
        rainfall: 202.9,
        latitude: None,
        longitude: None,
        prediction_name: name.map(String::from),
        predicted_crop: crop.to_string(),
        confidence: 0.97,
        created_at: NaiveDate::from_ymd_opt(2026, 9, 30)
            .unwrap()
            .and_hms_opt(14, 5, 11)
            .unwrap(),
    }
}

#[test]
fn quotes_in_fields_are_backslash_escaped() {
    let downloader = RecordingDownloader::default();
    let rows = vec![json!({"name": "A", "note": "say \"hi\""})];

    to_csv(&downloader, &rows, "notes.csv").unwrap();

    let files = downloader.files.borrow();
    let (filename, mime, contents) = &files[0];
    assert_eq!(filename, "notes.csv");
    assert_eq!(mime, "text/csv");
    let mut lines = contents.lines();
    assert_eq!(lines.next(), Some("name,note"));
    assert_eq!(lines.next(), Some(r#""A","say \"hi\"""#));
    assert_eq!(lines.next(), None);
}

#[test]
fn exports_history_in_column_order() {
    let downloader = RecordingDownloader::default();
    let rows = vec![
        record(2, "rice", Some("North \"wet\" field")),
        record(1, "maize", None),
    ];

    to_csv(&downloader, &rows, CSV_FILENAME).unwrap();

    let files = downloader.files.borrow();
    let (filename, _, contents) = &files[0];
    assert_eq!(filename, "predictions.csv");

    let lines: Vec<&str> = contents.split('\n').collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[0],
        "id,N,P,K,temperature,humidity,ph,rainfall,latitude,longitude,prediction_name,predicted_crop,confidence,created_at"
    );
    assert_eq!(
        lines[1],
        r#""2","90","42","43","20.5","82","6.5","202.9","null","null","North \"wet\" field","rice","0.97","2026-09-30 14:05:11""#
    );
    assert!(lines[2].starts_with(r#""1","#));
    assert!(lines[2].contains(r#""null","maize""#));
}

#[test]
fn download_failure_is_reported() {
    let downloader = RecordingDownloader {
        fail: true,
        ..Default::default()
    };
    let rows = vec![record(1, "rice", None)];

    let err = to_csv(&downloader, &rows, CSV_FILENAME).unwrap_err();
    assert!(matches!(err, ExportError::Download(_)));
}
