//! Generic load / append / rewrite over one delimited text file.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::marker::PhantomData;
use std::path::PathBuf;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::RepositoryError;

/// A record kind stored one per line.
///
/// Fields are written in declaration order, separated by commas, never quoted.
pub trait Record: Serialize + DeserializeOwned {
    /// Human-readable kind name used in logs.
    const KIND: &'static str;

    /// Number of fields on each line.
    const FIELDS: usize;

    /// Header line written first on a rewrite (and on the first append).
    ///
    /// When reading, a first line equal to the header is skipped. A file
    /// without the header is still accepted.
    const HEADER: Option<&'static str> = None;
}

/// Handle to the file holding every record of kind `R`.
#[derive(Debug, Clone)]
pub struct FlatFile<R> {
    path: PathBuf,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record> FlatFile<R> {
    /// Create a handle. The file is not touched until the first operation.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _record: PhantomData,
        }
    }

    /// Parse every line of the file.
    ///
    /// A missing file reads as empty. Lines that do not parse as `R` are
    /// skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Io` if the file exists but cannot be read.
    pub fn load_all(&self) -> Result<Vec<R>, RepositoryError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(kind = R::KIND, path = %self.path.display(), "No data file yet");
                return Ok(Vec::new());
            }
            Err(e) => return Err(RepositoryError::io(&self.path, e)),
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .from_reader(file);

        let mut records = Vec::new();
        for (index, row) in reader.records().enumerate() {
            let row = match row {
                Ok(row) => row,
                Err(e) if e.is_io_error() => {
                    return Err(RepositoryError::io(&self.path, io::Error::other(e)));
                }
                Err(e) => {
                    tracing::warn!(kind = R::KIND, line = index + 1, error = %e, "Skipping unreadable line");
                    continue;
                }
            };

            if index == 0
                && R::HEADER.is_some_and(|header| row.iter().eq(header.split(',')))
            {
                continue;
            }

            match row.deserialize::<R>(None) {
                Ok(record) => records.push(record),
                Err(e) => {
                    let line = row.position().map_or(index as u64 + 1, csv::Position::line);
                    tracing::warn!(kind = R::KIND, line, error = %e, "Skipping malformed line");
                }
            }
        }

        Ok(records)
    }

    /// Append one record, creating the file (with its header) if needed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Delimiter` if the record would not encode as
    /// a single line, or `RepositoryError::Io` if the write fails.
    pub fn append(&self, record: &R) -> Result<(), RepositoryError> {
        self.append_all(std::slice::from_ref(record))
    }

    /// Append several records with one open of the file.
    ///
    /// Nothing is written unless every record encodes.
    ///
    /// # Errors
    ///
    /// See [`FlatFile::append`].
    pub fn append_all(&self, records: &[R]) -> Result<(), RepositoryError> {
        let fresh = match fs::metadata(&self.path) {
            Ok(meta) => meta.len() == 0,
            Err(e) if e.kind() == io::ErrorKind::NotFound => true,
            Err(e) => return Err(RepositoryError::io(&self.path, e)),
        };

        let mut buffer = Vec::new();
        if fresh && let Some(header) = R::HEADER {
            buffer.extend_from_slice(header.as_bytes());
            buffer.push(b'\n');
        }
        for record in records {
            buffer.extend(encode(record)?);
        }

        self.ensure_parent()?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| RepositoryError::io(&self.path, e))?;
        file.write_all(&buffer)
            .map_err(|e| RepositoryError::io(&self.path, e))?;

        tracing::debug!(kind = R::KIND, count = records.len(), "Appended records");
        Ok(())
    }

    /// Replace the whole file with `records`, header first when the kind has one.
    ///
    /// The file is left untouched unless every record encodes.
    ///
    /// # Errors
    ///
    /// See [`FlatFile::append`].
    pub fn rewrite_all<'a, I>(&self, records: I) -> Result<(), RepositoryError>
    where
        I: IntoIterator<Item = &'a R>,
        R: 'a,
    {
        let mut buffer = Vec::new();
        if let Some(header) = R::HEADER {
            buffer.extend_from_slice(header.as_bytes());
            buffer.push(b'\n');
        }
        let mut count = 0_usize;
        for record in records {
            buffer.extend(encode(record)?);
            count += 1;
        }

        self.ensure_parent()?;
        fs::write(&self.path, buffer).map_err(|e| RepositoryError::io(&self.path, e))?;

        tracing::debug!(kind = R::KIND, count, "Rewrote data file");
        Ok(())
    }

    fn ensure_parent(&self) -> Result<(), RepositoryError> {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => {
                fs::create_dir_all(dir).map_err(|e| RepositoryError::io(dir, e))
            }
            _ => Ok(()),
        }
    }
}

/// Encode one record as a newline-terminated line.
fn encode<R: Record>(record: &R) -> Result<Vec<u8>, RepositoryError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Never)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer.serialize(record)?;
    let line = writer
        .into_inner()
        .map_err(|e| RepositoryError::Encoding(csv::Error::from(e.into_error())))?;

    let body = line.strip_suffix(b"\n").unwrap_or(&line);
    let separators = body.iter().filter(|&&b| b == b',').count();
    if separators + 1 != R::FIELDS || body.iter().any(|&b| b == b'\n' || b == b'\r') {
        return Err(RepositoryError::Delimiter(
            String::from_utf8_lossy(body).into_owned(),
        ));
    }

    Ok(line)
}
