use crate::file::csv::{error::FileError, settings::CsvSettings};
use model::records::{Header, Record, RecordSet};
use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;

/// Reader for a headered CSV artifact.
///
/// Opening parses the header row; `read_all` drains the remaining rows.
/// An empty field is an absent cell, so a null written by an upstream
/// stage survives a write/read cycle unchanged.
pub struct CsvSource {
    header: Header,
    reader: csv::Reader<File>,
}

impl CsvSource {
    /// Verifies the artifact exists as a regular file without opening a
    /// reader.
    pub fn probe(path: &Path) -> Result<(), FileError> {
        match std::fs::metadata(path) {
            Ok(metadata) if metadata.is_file() => Ok(()),
            Ok(_) => Err(FileError::NotFound(path.display().to_string())),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                Err(FileError::NotFound(path.display().to_string()))
            }
            Err(err) if err.kind() == ErrorKind::PermissionDenied => {
                Err(FileError::PermissionDenied(path.display().to_string()))
            }
            Err(err) => Err(FileError::IoError(err)),
        }
    }

    pub fn open(path: &Path, settings: CsvSettings) -> Result<Self, FileError> {
        Self::probe(path)?;
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(settings.delimiter as u8)
            .has_headers(true)
            .flexible(true)
            .from_path(path)?;
        let columns = reader.headers()?.iter().map(String::from).collect();
        Ok(CsvSource {
            header: Header::new(columns)?,
            reader,
        })
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Reads every data row into memory, consuming the source.
    pub fn read_all(self) -> Result<RecordSet, FileError> {
        let CsvSource { header, reader } = self;
        let mut set = RecordSet::new(header);
        for result in reader.into_records() {
            let record = result?;
            let cells = record
                .iter()
                .map(|field| {
                    if field.is_empty() {
                        None
                    } else {
                        Some(field.to_string())
                    }
                })
                .collect();
            set.push(Record::new(cells))?;
        }
        Ok(set)
    }
}
