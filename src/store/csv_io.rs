//! Reading and writing record files
//!
//! Each file is a header row followed by one row per record. Full saves go
//! through a temp file and a rename; appends write a single row at the end.

use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{Result, TrackerError};

fn open_existing(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => TrackerError::MissingStore {
            path: path.to_path_buf(),
        },
        _ => TrackerError::io(path, e),
    })
}

/// Read every row of a record file
pub fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let file = open_existing(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file);

    let rows = reader
        .deserialize()
        .collect::<std::result::Result<Vec<T>, _>>()
        .map_err(|source| TrackerError::MalformedStore {
            path: path.to_path_buf(),
            source,
        })?;

    debug!(path = %path.display(), rows = rows.len(), "Loaded record file");
    Ok(rows)
}

/// Overwrite a record file with a header and the given rows
pub fn write_rows<T: Serialize>(path: &Path, headers: &[&str], rows: &[T]) -> Result<()> {
    let temp_path = path.with_extension("csv.tmp");

    let written = write_temp(&temp_path, headers, rows)
        .and_then(|()| std::fs::rename(&temp_path, path).map_err(|e| TrackerError::io(path, e)));
    if let Err(e) = written {
        if let Err(cleanup) = std::fs::remove_file(&temp_path) {
            debug!(path = %temp_path.display(), error = %cleanup, "Temp file not removed");
        }
        return Err(e);
    }

    debug!(path = %path.display(), rows = rows.len(), "Saved record file");
    Ok(())
}

fn write_temp<T: Serialize>(temp_path: &Path, headers: &[&str], rows: &[T]) -> Result<()> {
    let file = File::create(temp_path).map_err(|e| TrackerError::io(temp_path, e))?;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);
    writer
        .write_record(headers)
        .map_err(|e| csv_write_error(temp_path, e))?;
    for row in rows {
        writer
            .serialize(row)
            .map_err(|e| csv_write_error(temp_path, e))?;
    }

    let file = writer
        .into_inner()
        .map_err(|e| TrackerError::io(temp_path, e.into_error()))?;
    file.sync_all().map_err(|e| TrackerError::io(temp_path, e))
}

/// Append one row to an existing record file
///
/// A missing trailing newline is repaired first so the new row never joins
/// the previous one.
pub fn append_row<T: Serialize>(path: &Path, row: &T) -> Result<()> {
    if !path.exists() {
        return Err(TrackerError::MissingStore {
            path: path.to_path_buf(),
        });
    }

    let mut file = OpenOptions::new()
        .read(true)
        .append(true)
        .open(path)
        .map_err(|e| TrackerError::io(path, e))?;

    let len = file.metadata().map_err(|e| TrackerError::io(path, e))?.len();
    if len > 0 {
        let mut last = [0u8; 1];
        file.seek(SeekFrom::End(-1))
            .and_then(|_| file.read_exact(&mut last))
            .map_err(|e| TrackerError::io(path, e))?;
        if last[0] != b'\n' {
            file.write_all(b"\n").map_err(|e| TrackerError::io(path, e))?;
        }
    }

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(&mut file);
    writer.serialize(row).map_err(|e| csv_write_error(path, e))?;
    writer.flush().map_err(|e| TrackerError::io(path, e))?;

    debug!(path = %path.display(), "Appended record");
    Ok(())
}

fn csv_write_error(path: &Path, error: csv::Error) -> TrackerError {
    let source = match error.into_kind() {
        csv::ErrorKind::Io(io) => io,
        other => std::io::Error::other(format!("{other:?}")),
    };
    TrackerError::io(path, source)
}
