use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, StringRecordsIntoIter};
use serde_json::Value;

use crate::error::{ConvertError, ConvertResult};
use crate::record::Record;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// A raw CSV row keyed by header name, with the line it started on
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    pub line: u64,
    pub record: Record,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuoteState {
    FieldStart,
    Unquoted,
    Quoted,
    QuoteInQuoted,
}

/// Watches the bytes handed to the CSV parser so a quoted field still open
/// at end of input can be reported. The csv crate accepts it silently.
struct QuoteTracker<R> {
    inner: R,
    state: QuoteState,
    line: u64,
    open_line: u64,
}

impl<R> QuoteTracker<R> {
    fn new(inner: R) -> Self {
        Self {
            inner,
            state: QuoteState::FieldStart,
            line: 1,
            open_line: 1,
        }
    }

    fn scan(&mut self, bytes: &[u8]) {
        use QuoteState::*;

        for &b in bytes {
            self.state = match (self.state, b) {
                (FieldStart, b'"') => {
                    self.open_line = self.line;
                    Quoted
                }
                (FieldStart | Unquoted | QuoteInQuoted, b',' | b'\n' | b'\r') => FieldStart,
                (FieldStart | Unquoted, _) => Unquoted,
                (Quoted, b'"') => QuoteInQuoted,
                (Quoted, _) => Quoted,
                // "" inside a quoted field
                (QuoteInQuoted, b'"') => Quoted,
                (QuoteInQuoted, _) => Unquoted,
            };
            if b == b'\n' {
                self.line += 1;
            }
        }
    }

    /// Line of the opening quote when input ended inside a quoted field
    fn unterminated_quote(&self) -> Option<u64> {
        (self.state == QuoteState::Quoted).then_some(self.open_line)
    }
}

impl<R: Read> Read for QuoteTracker<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.scan(&buf[..n]);
        Ok(n)
    }
}

/// Reads header-keyed rows from comma-separated, RFC 4180 quoted input.
/// A leading UTF-8 BOM is skipped. Input ending inside a quoted field is an
/// error, reported after the last row.
pub struct CsvRecordReader<R: BufRead> {
    headers: StringRecord,
    records: StringRecordsIntoIter<QuoteTracker<R>>,
    finished: bool,
}

impl CsvRecordReader<BufReader<File>> {
    pub fn from_path(path: &Path) -> ConvertResult<Self> {
        let file = File::open(path).map_err(|source| ConvertError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_reader(BufReader::with_capacity(32 * 1024, file))
    }
}

impl<R: BufRead> CsvRecordReader<R> {
    pub fn from_reader(mut input: R) -> ConvertResult<Self> {
        if input.fill_buf().map_err(csv::Error::from)?.starts_with(UTF8_BOM) {
            input.consume(UTF8_BOM.len());
        }

        let mut reader = ReaderBuilder::new()
            .delimiter(b',')
            .quote(b'"')
            .double_quote(true)
            .flexible(true) // Short and long rows are handled per field
            .has_headers(true)
            .from_reader(QuoteTracker::new(input));

        let headers = reader.headers()?.clone();

        Ok(Self {
            headers,
            records: reader.into_records(),
            finished: false,
        })
    }

    pub fn headers(&self) -> &StringRecord {
        &self.headers
    }

    fn to_raw_row(&self, row: &StringRecord) -> RawRow {
        let mut record = Record::new();
        for (i, field) in row.iter().enumerate() {
            // Cells past the header row get a positional name
            let header_name = self
                .headers
                .get(i)
                .map(|s| s.to_string())
                .unwrap_or_else(|| format!("column_{}", i));

            record.insert(header_name, Value::String(field.to_string()));
        }

        RawRow {
            line: row.position().map(|p| p.line()).unwrap_or(0),
            record,
        }
    }
}

impl<R: BufRead> Iterator for CsvRecordReader<R> {
    type Item = ConvertResult<RawRow>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.records.next() {
            Some(result) => Some(
                result
                    .map(|row| self.to_raw_row(&row))
                    .map_err(ConvertError::from),
            ),
            None => {
                self.finished = true;
                let line = self.records.reader().get_ref().unterminated_quote()?;
                Some(Err(ConvertError::UnterminatedQuote { line }))
            }
        }
    }
}
