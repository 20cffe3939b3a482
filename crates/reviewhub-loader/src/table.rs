//! Header-first CSV reading.

use csv_async::{AsyncReaderBuilder, ByteRecord};
use reviewhub_core::LoadError;
use tokio::io::AsyncRead;
use tracing::warn;

/// A parsed table: header names plus rows padded/truncated to the header width.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn csv_error(err: csv_async::Error) -> LoadError {
    if err.is_io_error() {
        LoadError::UnexpectedError(err.to_string())
    } else {
        LoadError::ParseError(err.to_string())
    }
}

/// Reads a CSV stream whose first record names the columns.
///
/// Ragged rows are tolerated: missing trailing cells read as empty strings and
/// surplus cells are dropped. Cells that are not UTF-8 also read as empty.
pub async fn read_table<R>(reader: R) -> Result<Table, LoadError>
where
    R: AsyncRead + Unpin + Send,
{
    let mut csv = AsyncReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .create_reader(reader);

    let header_record = csv.byte_headers().await.map_err(csv_error)?.clone();
    if header_record.is_empty() {
        return Err(LoadError::ParseError("no header row".into()));
    }
    let headers = header_record
        .iter()
        .enumerate()
        .map(|(i, raw)| {
            String::from_utf8(raw.to_vec()).map_err(|_| {
                LoadError::ParseError(format!("header {} is not valid UTF-8", i + 1))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let width = headers.len();
    let mut rows = Vec::new();
    let mut record = ByteRecord::new();
    while csv.read_byte_record(&mut record).await.map_err(csv_error)? {
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let mut cells: Vec<String> = record
            .iter()
            .take(width)
            .enumerate()
            .map(|(i, raw)| match String::from_utf8(raw.to_vec()) {
                Ok(cell) => cell,
                Err(_) => {
                    warn!(line, column = %headers[i], "Cell is not valid UTF-8, reading as empty");
                    String::new()
                }
            })
            .collect();
        cells.resize(width, String::new());
        rows.push(cells);
    }

    Ok(Table { headers, rows })
}
