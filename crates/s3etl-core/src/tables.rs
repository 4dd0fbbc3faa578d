//! Rendering model for the file list: one table of raw files, one of
//! processed files.

use crate::models::{FileRecord, ProcessedFile, RawFile};
use serde::Serialize;

/// One rendered table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRow {
    pub name: String,
    pub size_label: String,
    pub timestamp: String,
    pub url: String,
}

pub fn size_label(bytes: u64) -> String {
    format!("{} bytes", bytes)
}

impl From<&RawFile> for FileRow {
    fn from(raw: &RawFile) -> Self {
        FileRow {
            name: raw.name.clone(),
            size_label: size_label(raw.original.size),
            timestamp: raw.timestamp.clone(),
            url: raw.original.url.clone(),
        }
    }
}

impl From<&ProcessedFile> for FileRow {
    fn from(processed: &ProcessedFile) -> Self {
        FileRow {
            name: processed.name.clone(),
            size_label: size_label(processed.size),
            timestamp: processed.timestamp.clone(),
            url: processed.url.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileTables {
    pub raw: Vec<FileRow>,
    pub processed: Vec<FileRow>,
}

impl FileTables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: &[FileRecord]) -> Self {
        let mut tables = Self::new();
        for record in records {
            tables.push_record(record);
        }
        tables
    }

    pub fn clear(&mut self) {
        self.raw.clear();
        self.processed.clear();
    }

    /// Add a row to each table whose half is present on `record`.
    pub fn push_record(&mut self, record: &FileRecord) {
        if let Some(raw) = &record.raw {
            self.raw.push(FileRow::from(raw));
        }
        if let Some(processed) = &record.processed {
            self.processed.push(FileRow::from(processed));
        }
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty() && self.processed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(body: &str) -> Vec<FileRecord> {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn test_one_row_per_present_half() {
        let tables = FileTables::from_records(&records(
            r#"[
                {"Raw": {"Name": "a.jpg", "Original": {"Size": 10, "URL": "u1"}, "Timestamp": "t1"}},
                {"Processed": {"Name": "b.jpg", "Size": 20, "URL": "u2", "Timestamp": "t2"}}
            ]"#,
        ));

        assert_eq!(
            tables.raw,
            vec![FileRow {
                name: "a.jpg".to_string(),
                size_label: "10 bytes".to_string(),
                timestamp: "t1".to_string(),
                url: "u1".to_string(),
            }]
        );
        assert_eq!(
            tables.processed,
            vec![FileRow {
                name: "b.jpg".to_string(),
                size_label: "20 bytes".to_string(),
                timestamp: "t2".to_string(),
                url: "u2".to_string(),
            }]
        );
    }

    #[test]
    fn test_record_with_both_halves_fills_both_tables() {
        let tables = FileTables::from_records(&records(
            r#"[{
                "Raw": {"Name": "c.jpg", "Original": {"Size": 3, "URL": "r"}, "Timestamp": "t"},
                "Processed": {"Name": "c.jpg", "Size": 2, "URL": "p", "Timestamp": "t"}
            }]"#,
        ));
        assert_eq!(tables.raw.len(), 1);
        assert_eq!(tables.processed.len(), 1);
    }

    #[test]
    fn test_record_without_halves_adds_nothing() {
        let tables = FileTables::from_records(&records(r#"[{}, {"Unrelated": true}]"#));
        assert!(tables.is_empty());
    }

    #[test]
    fn test_clear_empties_both_tables() {
        let mut tables = FileTables::from_records(&records(
            r#"[{"Processed": {"Name": "b.jpg", "Size": 20, "URL": "u2", "Timestamp": "t2"}}]"#,
        ));
        tables.clear();
        assert!(tables.is_empty());
    }
}
