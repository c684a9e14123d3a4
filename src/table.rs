use std::path::Path;

use crate::error::{Result, SiftError};

/// One document's extracted values, index-aligned with a field schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    values: Vec<String>,
}

impl Record {
    #[must_use]
    pub fn new(values: Vec<String>) -> Self {
        Self { values }
    }

    #[must_use]
    pub fn values(&self) -> &[String] {
        &self.values
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Header plus accumulated records. Every record has exactly `header.len()`
/// values; rows keep insertion order.
#[derive(Debug, Clone)]
pub struct Table {
    header: Vec<String>,
    records: Vec<Record>,
}

impl Table {
    #[must_use]
    pub fn new(header: Vec<String>) -> Self {
        Self {
            header,
            records: Vec::new(),
        }
    }

    pub fn push(&mut self, record: Record) -> Result<()> {
        if record.len() != self.header.len() {
            return Err(SiftError::RecordWidth {
                expected: self.header.len(),
                got: record.len(),
            });
        }
        self.records.push(record);
        Ok(())
    }

    #[must_use]
    pub fn header(&self) -> &[String] {
        &self.header
    }

    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Serialize to a CSV artifact, replacing whatever exists at `path`.
    /// Quoting of embedded delimiters, quotes and newlines follows the csv
    /// crate's defaults.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let wrap = |source: csv::Error| SiftError::Write {
            path: path.display().to_string(),
            source,
        };

        let mut writer = csv::Writer::from_path(path).map_err(wrap)?;
        writer.write_record(&self.header).map_err(wrap)?;
        for record in &self.records {
            writer.write_record(record.values()).map_err(wrap)?;
        }
        writer.flush().map_err(|e| wrap(csv::Error::from(e)))?;
        Ok(())
    }
}
