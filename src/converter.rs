use std::path::Path;

use crate::error::{ConvertError, ConvertResult};
use crate::reader::CsvRecordReader;
use crate::record::{transform_record, Record};
use crate::writer::{render_json, write_output, OutputTarget};

/// Outcome of a finished conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionSummary {
    pub records: usize,
    pub target: OutputTarget,
}

/// Converts a song CSV file into a JSON array of normalized records.
///
/// The whole dataset is built and rendered before the output is opened, so a
/// failure on any row leaves the destination untouched.
#[derive(Debug, Clone, Default)]
pub struct SongConverter {
    pub write_bom: bool,
}

impl SongConverter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefix the output with a UTF-8 byte order mark
    pub fn with_bom(mut self, write_bom: bool) -> Self {
        self.write_bom = write_bom;
        self
    }

    /// Reads and normalizes every row of `input_path`, stopping at the first error
    pub fn load(&self, input_path: &Path) -> ConvertResult<Vec<Record>> {
        let mut records = Vec::new();
        for row in CsvRecordReader::from_path(input_path)? {
            let row = row?;
            let record = transform_record(row.record).map_err(|source| ConvertError::Record {
                line: row.line,
                source,
            })?;
            records.push(record);
        }
        Ok(records)
    }

    pub fn convert(&self, input_path: &Path, output_path: &Path) -> ConvertResult<ConversionSummary> {
        let records = self.load(input_path)?;
        let document = render_json(&records, self.write_bom)?;

        let target = OutputTarget::from_path(output_path);
        write_output(&document, &target)?;

        Ok(ConversionSummary {
            records: records.len(),
            target,
        })
    }
}
