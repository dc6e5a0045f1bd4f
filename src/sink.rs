//! File sink: where lines go on disk and how they get there.

use std::fs::{self, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use time::Date;

use crate::error::{Error, FileOp, Result};

/// Where the file sink writes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum FileTarget {
    /// No file sink
    #[default]
    None,
    /// A fixed file path
    File(PathBuf),
    /// A directory holding one `YYYYMMDD.log` per UTC day
    Daily(PathBuf),
}

impl FileTarget {
    /// Resolve to a concrete file; `today` picks the daily file name.
    #[must_use]
    pub fn resolve(&self, today: Date) -> Option<PathBuf> {
        match self {
            Self::None => None,
            Self::File(p) => Some(p.clone()),
            Self::Daily(dir) => Some(daily_path(dir, today)),
        }
    }
}

/// `<dir>/<YYYYMMDD>.log`
#[must_use]
pub fn daily_path(dir: &Path, date: Date) -> PathBuf {
    dir.join(format!(
        "{:04}{:02}{:02}.log",
        date.year(),
        u8::from(date.month()),
        date.day()
    ))
}

/// Append one line to `path`, opening and closing the file around the write.
///
/// With `create` the parent directories and the file are created as needed; without
/// it a missing file is [`Error::MissingFile`] and nothing is created.
/// # Errors
/// Directory creation, open, write, flush or sync failures.
pub fn append_line(path: &Path, line: &str, create: bool, sync: bool) -> Result<()> {
    if create {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|source| Error::CreateDir {
                path: dir.to_owned(),
                source,
            })?;
        }
    }

    let file = OpenOptions::new()
        .append(true)
        .create(create)
        .open(path)
        .map_err(|source| match source.kind() {
            io::ErrorKind::NotFound if !create => Error::MissingFile {
                path: path.to_owned(),
            },
            _ => file_error(FileOp::Open, path, source),
        })?;

    let mut w = BufWriter::new(file);
    w.write_all(line.as_bytes())
        .map_err(|e| file_error(FileOp::Write, path, e))?;
    w.flush().map_err(|e| file_error(FileOp::Flush, path, e))?;
    if sync {
        w.get_ref()
            .sync_data()
            .map_err(|e| file_error(FileOp::Sync, path, e))?;
    }
    Ok(())
}

fn file_error(op: FileOp, path: &Path, source: io::Error) -> Error {
    Error::File {
        op,
        path: path.to_owned(),
        source,
    }
}
