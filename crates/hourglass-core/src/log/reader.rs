use super::extract::{Record, extract};
use crate::{Error, Result};
use std::borrow::Cow;
use std::io::ErrorKind;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

pub struct LogReader;

impl LogReader {
    /// Read a log file and extract one record per line, in file order
    pub async fn from_file(path: &Path) -> Result<Vec<Record>> {
        tracing::debug!("Reading log file from: {}", path.display());

        let file = File::open(path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => Error::FileNotFound(path.to_path_buf()),
            _ => Error::Io(e),
        })?;
        let records = Self::from_reader(BufReader::new(file)).await?;

        if records.is_empty() {
            tracing::warn!("Log file {} contains no lines", path.display());
        }

        tracing::info!(
            "Successfully parsed log file with {} records",
            records.len()
        );

        Ok(records)
    }

    /// Extract records from any buffered async source.
    ///
    /// Invalid UTF-8 is replaced with U+FFFD rather than failing the read.
    pub async fn from_reader<R>(mut reader: R) -> Result<Vec<Record>>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut records = Vec::new();
        let mut buf = Vec::new();
        let mut lossy = 0usize;

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf).await? == 0 {
                break;
            }
            if buf.last() == Some(&b'\n') {
                buf.pop();
                if buf.last() == Some(&b'\r') {
                    buf.pop();
                }
            }

            let line = String::from_utf8_lossy(&buf);
            if matches!(line, Cow::Owned(_)) {
                lossy += 1;
            }
            records.push(extract(&line));
        }

        if lossy > 0 {
            tracing::debug!("Replaced invalid UTF-8 on {} lines", lossy);
        }

        Ok(records)
    }
}
