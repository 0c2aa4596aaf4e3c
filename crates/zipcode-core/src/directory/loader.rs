//! Dataset loader
//!
//! Reads the headerless seven-column zip code CSV:
//!
//! ```text
//! zipcode,city,state,state_code,country,latitude,longitude
//! ```
//!
//! Records with the wrong number of columns, or that cannot be decoded, are
//! skipped with a warning. Only failing to open or read the source aborts the
//! load.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ErrorKind, ReaderBuilder, StringRecord};
use tracing::{debug, info, warn};

use super::error::{LoadError, LoadResult};
use super::Directory;
use crate::entry::Entry;

/// Parses comma-delimited dataset sources into a [`Directory`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DatasetLoader;

impl DatasetLoader {
    pub fn new() -> Self {
        Self
    }

    /// Load the dataset file at `path`
    pub fn load_path(&self, path: impl AsRef<Path>) -> LoadResult<Directory> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Opening dataset");

        let file = File::open(path).map_err(|source| LoadError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        self.load_reader(file)
    }

    /// Load the dataset from any reader
    pub fn load_reader<R: Read>(&self, reader: R) -> LoadResult<Directory> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut entries = Vec::new();
        let mut skipped = 0usize;

        for (idx, result) in reader.records().enumerate() {
            let position = idx + 1;

            let record = match result {
                Ok(record) => record,
                Err(err) => {
                    let line = err.position().map(|p| p.line());
                    match err.into_kind() {
                        ErrorKind::Io(source) => return Err(LoadError::Read(source)),
                        kind => {
                            warn!(
                                record = position,
                                line = ?line,
                                error = ?kind,
                                "Skipping undecodable dataset record"
                            );
                            skipped += 1;
                            continue;
                        }
                    }
                }
            };

            match entry_from_record(&record) {
                Some(entry) => entries.push(entry),
                None => {
                    warn!(
                        record = position,
                        line = ?record.position().map(|p| p.line()),
                        fields = record.len(),
                        expected = Entry::FIELD_COUNT,
                        "Skipping malformed dataset record"
                    );
                    skipped += 1;
                }
            }
        }

        info!(
            entries = entries.len(),
            skipped = skipped,
            "Zip code dataset loaded"
        );

        Ok(Directory::new(entries))
    }
}

/// Convert a record to an entry, or `None` if it does not have exactly
/// [`Entry::FIELD_COUNT`] fields
fn entry_from_record(record: &StringRecord) -> Option<Entry> {
    if record.len() != Entry::FIELD_COUNT {
        return None;
    }

    Some(Entry {
        zipcode: record[0].to_string(),
        city: record[1].to_string(),
        state: record[2].to_string(),
        state_code: record[3].to_string(),
        country: record[4].to_string(),
        latitude: record[5].to_string(),
        longitude: record[6].to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tracing_test::traced_test;

    const SAMPLE: &str = "\
00501,Holtsville,New York,NY,Suffolk,40.8154,-73.0451
00544,Holtsville,New York,NY,Suffolk,40.8154,-73.0451
10001,New York City,New York,NY,New York,40.7484,-73.9967
";

    #[test]
    fn test_load_reader_in_order() {
        let directory = DatasetLoader::new().load_reader(SAMPLE.as_bytes()).unwrap();

        let zipcodes: Vec<&str> = directory.iter().map(|e| e.zipcode.as_str()).collect();
        assert_eq!(zipcodes, vec!["00501", "00544", "10001"]);

        let first = &directory.entries()[0];
        assert_eq!(
            first,
            &Entry {
                zipcode: "00501".to_string(),
                city: "Holtsville".to_string(),
                state: "New York".to_string(),
                state_code: "NY".to_string(),
                country: "Suffolk".to_string(),
                latitude: "40.8154".to_string(),
                longitude: "-73.0451".to_string(),
            }
        );
    }

    #[test]
    fn test_fields_kept_as_text() {
        let csv = "007,Ponce,Puerto Rico,PR,Ponce,18.0110,-66.6140\n";
        let directory = DatasetLoader::new().load_reader(csv.as_bytes()).unwrap();

        let entry = &directory.entries()[0];
        assert_eq!(entry.zipcode, "007");
        assert_eq!(entry.latitude, "18.0110");
    }

    #[test]
    fn test_quoted_fields() {
        let csv = "20001,\"Washington, D.C.\",District of Columbia,DC,USA,38.9,-77.0\n";
        let directory = DatasetLoader::new().load_reader(csv.as_bytes()).unwrap();

        assert_eq!(directory.len(), 1);
        assert_eq!(directory.entries()[0].city, "Washington, D.C.");
    }

    #[test]
    fn test_skips_malformed_records() {
        let csv = "\
00501,Holtsville,New York,NY,Suffolk,40.8154,-73.0451
bad,row
00544,Holtsville,New York,NY,Suffolk,40.8154,-73.0451,extra
10001,New York City,New York,NY,New York,40.7484,-73.9967
";
        let directory = DatasetLoader::new().load_reader(csv.as_bytes()).unwrap();

        let zipcodes: Vec<&str> = directory.iter().map(|e| e.zipcode.as_str()).collect();
        assert_eq!(zipcodes, vec!["00501", "10001"]);
    }

    #[test]
    fn test_skips_undecodable_records() {
        let mut bytes = b"00501,Holtsville,New York,NY,Suffolk,40.8154,-73.0451\n".to_vec();
        bytes.extend_from_slice(b"00544,Holts\xffville,New York,NY,Suffolk,40.8154,-73.0451\n");
        bytes.extend_from_slice(b"10001,New York City,New York,NY,New York,40.7484,-73.9967\n");

        let directory = DatasetLoader::new().load_reader(bytes.as_slice()).unwrap();

        let zipcodes: Vec<&str> = directory.iter().map(|e| e.zipcode.as_str()).collect();
        assert_eq!(zipcodes, vec!["00501", "10001"]);
    }

    #[test]
    #[traced_test]
    fn test_skipped_records_are_logged() {
        let csv = "\
00501,Holtsville,New York,NY,Suffolk,40.8154,-73.0451
bad,row
00544,Holtsville,New York,NY,Suffolk,40.8154,-73.0451,extra
10001,New York City,New York,NY,New York,40.7484,-73.9967
";
        DatasetLoader::new().load_reader(csv.as_bytes()).unwrap();

        logs_assert(|lines: &[&str]| {
            let skips: Vec<&&str> = lines
                .iter()
                .filter(|line| line.contains("Skipping malformed dataset record"))
                .collect();
            if skips.len() != 2 {
                return Err(format!("expected 2 skip warnings, got {}", skips.len()));
            }
            if !skips.iter().all(|line| line.contains("WARN")) {
                return Err("skip events must be warnings".to_string());
            }
            if !(skips[0].contains("record=2") && skips[0].contains("fields=2")) {
                return Err(format!("unexpected first skip: {}", skips[0]));
            }
            if !(skips[1].contains("record=3") && skips[1].contains("fields=8")) {
                return Err(format!("unexpected second skip: {}", skips[1]));
            }
            Ok(())
        });
        assert!(logs_contain("Zip code dataset loaded"));
        assert!(logs_contain("entries=2 skipped=2"));
    }

    #[test]
    #[traced_test]
    fn test_undecodable_record_is_logged() {
        let mut bytes = b"00501,Holtsville,New York,NY,Suffolk,40.8154,-73.0451\n".to_vec();
        bytes.extend_from_slice(b"00544,Holts\xffville,New York,NY,Suffolk,40.8154,-73.0451\n");

        DatasetLoader::new().load_reader(bytes.as_slice()).unwrap();

        assert!(logs_contain("Skipping undecodable dataset record"));
        assert!(logs_contain("record=2"));
        assert!(logs_contain("entries=1 skipped=1"));
    }

    #[test]
    fn test_empty_source() {
        let directory = DatasetLoader::new().load_reader("".as_bytes()).unwrap();
        assert!(directory.is_empty());
    }

    #[test]
    fn test_semicolons_are_not_separators() {
        let csv = "00501;Holtsville;New York;NY;Suffolk;40.8154;-73.0451\n";
        let directory = DatasetLoader::new().load_reader(csv.as_bytes()).unwrap();

        assert!(directory.is_empty());
    }

    #[test]
    fn test_load_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        file.flush().unwrap();

        let directory = DatasetLoader::new().load_path(file.path()).unwrap();
        assert_eq!(directory.len(), 3);
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("zips.csv");

        let err = DatasetLoader::new().load_path(&path).unwrap_err();
        match &err {
            LoadError::Open { path: failed, .. } => assert_eq!(failed, &path),
            other => panic!("expected Open error, got {other:?}"),
        }
        assert!(err.to_string().contains("zips.csv"));
    }

    #[test]
    fn test_read_failure_is_fatal() {
        struct FailingReader;

        impl Read for FailingReader {
            fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::Other, "disk gone"))
            }
        }

        let err = DatasetLoader::new().load_reader(FailingReader).unwrap_err();
        assert!(matches!(err, LoadError::Read(_)));
    }
}
