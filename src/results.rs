// Per-image outcome records and the JSON file they end up in.

use crate::error::{FailureKind, PersistError};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UploadStatus {
    Uploaded,
    Failed,
}

/// Outcome of one image slot (the breed itself or one sub-breed).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UploadRecord {
    pub breed: String,
    pub sub_breed: Option<String>,
    pub image_url: Option<String>,
    pub destination_path: String,
    pub status: UploadStatus,
    /// Why a failed slot failed. Not written to the result file.
    #[serde(skip)]
    pub failure: Option<FailureKind>,
}

impl UploadRecord {
    pub fn is_uploaded(&self) -> bool {
        self.status == UploadStatus::Uploaded
    }
}

/// Ordered collection of records for one run.
#[derive(Debug, Default)]
pub struct ResultRecorder {
    records: Vec<UploadRecord>,
}

impl ResultRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, record: UploadRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[UploadRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<UploadRecord> {
        self.records
    }

    pub fn persist(&self, path: &Path) -> Result<(), PersistError> {
        persist(&self.records, path)
    }
}

/// Write `records` to `path` as a JSON array indented by four spaces.
/// Non-ASCII text is written as-is.
pub fn persist(records: &[UploadRecord], path: &Path) -> Result<(), PersistError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    records.serialize(&mut ser)?;
    buf.push(b'\n');

    std::fs::write(path, buf).map_err(|source| PersistError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(sub_breed: Option<&str>, status: UploadStatus) -> UploadRecord {
        UploadRecord {
            breed: "hound".into(),
            sub_breed: sub_breed.map(str::to_string),
            image_url: Some("https://images.dog.ceo/breeds/hound/1.jpg".into()),
            destination_path: "/hound/hound_1.jpg".into(),
            status,
            failure: None,
        }
    }

    #[test]
    fn keeps_insertion_order() {
        let mut recorder = ResultRecorder::new();
        recorder.append(record(None, UploadStatus::Uploaded));
        recorder.append(record(Some("afghan"), UploadStatus::Failed));
        recorder.append(record(Some("blood"), UploadStatus::Uploaded));

        let subs: Vec<_> = recorder
            .records()
            .iter()
            .map(|r| r.sub_breed.as_deref())
            .collect();
        assert_eq!(subs, vec![None, Some("afghan"), Some("blood")]);
    }

    #[test]
    fn persisted_file_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.json");

        let mut recorder = ResultRecorder::new();
        recorder.append(record(None, UploadStatus::Uploaded));
        let mut failed = record(Some("бассет"), UploadStatus::Failed);
        failed.image_url = None;
        failed.failure = Some(FailureKind::Network);
        recorder.append(failed);
        recorder.persist(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("бассет"));
        assert!(text.contains("\n    {"));
        assert!(text.contains("\"status\": \"failed\""));
        assert!(text.contains("\"image_url\": null"));
        assert!(!text.contains("failure"));

        let back: Vec<UploadRecord> = serde_json::from_str(&text).unwrap();
        assert_eq!(back.len(), 2);
        for (read, written) in back.iter().zip(recorder.records()) {
            assert_eq!(read.breed, written.breed);
            assert_eq!(read.sub_breed, written.sub_breed);
            assert_eq!(read.image_url, written.image_url);
            assert_eq!(read.destination_path, written.destination_path);
            assert_eq!(read.status, written.status);
        }
    }

    #[test]
    fn unwritable_path_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("results.json");
        let err = persist(&[], &path).unwrap_err();
        assert!(matches!(err, PersistError::Io { .. }));
    }
}
