//! Semicolon-separated record file
//!
//! One record per line, `name;ttl;type;data`, no header, `\n` line endings.
//! Parsing is all-or-nothing: the first bad line aborts the whole read.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::{Error, Result};
use crate::group::ZoneRecords;
use crate::record::{DnsRecord, RecordType};

/// Field separator
pub const DELIMITER: char = ';';

/// Parse one line (without terminator); `line_no` is 1-based
pub fn parse_line(line: &str, line_no: usize) -> Result<DnsRecord> {
    let fields: Vec<&str> = line.trim_end().split(DELIMITER).collect();
    let [name, ttl, record_type, data] = fields.as_slice() else {
        tracing::debug!(
            "Line {} has {} field(s), expected 4",
            line_no,
            fields.len()
        );
        return Err(Error::invalid_csv(line_no));
    };

    let ttl: u32 = ttl.parse().map_err(|_| {
        tracing::debug!("Line {} has a non-numeric TTL: {:?}", line_no, ttl);
        Error::invalid_csv(line_no)
    })?;

    Ok(DnsRecord::new(
        *name,
        ttl,
        RecordType::from_mnemonic(record_type),
        *data,
    ))
}

/// Parse every line of `reader`
pub fn read_records<R: BufRead>(reader: R) -> Result<Vec<DnsRecord>> {
    reader
        .lines()
        .enumerate()
        .map(|(idx, line)| parse_line(&line?, idx + 1))
        .collect()
}

/// Read a CSV file and group its rows by name
pub fn read_zone_file(path: impl AsRef<Path>) -> Result<ZoneRecords> {
    let path = path.as_ref();
    tracing::debug!("Reading records from {}", path.display());

    let file = File::open(path)?;
    let records = read_records(BufReader::new(file))?;
    tracing::info!("Read {} record(s) from {}", records.len(), path.display());

    Ok(ZoneRecords::from_records(records))
}

/// Sequential writer of CSV rows
pub struct CsvWriter<W: Write> {
    inner: W,
    rows: usize,
}

impl CsvWriter<BufWriter<File>> {
    /// Create (or truncate) a CSV file
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(BufWriter::new(File::create(path)?)))
    }
}

impl<W: Write> CsvWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, rows: 0 }
    }

    /// Write one record as a `\n`-terminated row
    pub fn write_record(&mut self, record: &DnsRecord) -> Result<()> {
        writeln!(self.inner, "{}", record)?;
        self.rows += 1;
        Ok(())
    }

    /// Rows written so far
    pub fn rows_written(&self) -> usize {
        self.rows
    }

    /// Flush and hand back the underlying writer
    pub fn finish(mut self) -> Result<W> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}
