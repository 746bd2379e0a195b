use crate::error::RecordError;
use crate::records::{Header, Record};

/// A header plus the rows that conform to it.
///
/// Construction and `push` enforce that every record has exactly one cell
/// per header column, so downstream stages can index cells by header
/// position without re-checking arity. Row numbers in errors are 1-based,
/// counting data rows only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSet {
    header: Header,
    records: Vec<Record>,
}

impl RecordSet {
    pub fn new(header: Header) -> Self {
        RecordSet { header, records: Vec::new() }
    }

    pub fn with_records(header: Header, records: Vec<Record>) -> Result<Self, RecordError> {
        let mut set = RecordSet::new(header);
        for record in records {
            set.push(record)?;
        }
        Ok(set)
    }

    pub fn push(&mut self, record: Record) -> Result<(), RecordError> {
        if record.len() != self.header.len() {
            return Err(RecordError::Arity {
                row: self.records.len() + 1,
                expected: self.header.len(),
                found: record.len(),
            });
        }
        self.records.push(record);
        Ok(())
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Record> {
        self.records.iter_mut()
    }

    /// Drops every record the predicate rejects, preserving order.
    pub fn retain<F>(&mut self, f: F)
    where
        F: FnMut(&Record) -> bool,
    {
        self.records.retain(f);
    }

    pub fn column_position(&self, name: &str) -> Option<usize> {
        self.header.position(name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
