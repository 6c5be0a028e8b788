use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use flate2::Compression;
use flate2::write::GzEncoder;
use time::{Date, Duration, OffsetDateTime};

/// How long rotated archives are kept before deletion.
const RETENTION_DAYS: i64 = 30;

/// State of the current log file.
#[derive(Debug)]
struct FileState {
    /// The open file handle.
    file: File,
    /// UTC date suffix of the current file.
    date_suffix: String,
}

/// A writer that rotates log files at UTC day boundaries.
///
/// Lines land in `{directory}/{file_stem}.{YYYY-MM-DD}`. On the first write
/// of a new day the previous day's file is gzip-compressed in place and
/// archives older than 30 days are deleted. Rotation timing is wall-clock
/// driven, not request driven.
pub struct DailyRotatingWriter {
    directory: PathBuf,
    file_stem: String,
    /// Current file state, protected by mutex.
    state: Arc<Mutex<Option<FileState>>>,
}

const DATE_PATTERN: &str = "[year]-[month]-[day]";

fn utc_date_suffix() -> io::Result<String> {
    let format = time::format_description::parse(DATE_PATTERN).map_err(io::Error::other)?;
    OffsetDateTime::now_utc()
        .format(&format)
        .map_err(io::Error::other)
}

impl DailyRotatingWriter {
    /// Create a new rotating writer, creating the directory and today's file.
    pub fn new(directory: impl Into<PathBuf>, file_stem: impl Into<String>) -> io::Result<Self> {
        let writer = Self {
            directory: directory.into(),
            file_stem: file_stem.into(),
            state: Arc::new(Mutex::new(None)),
        };

        fs::create_dir_all(&writer.directory)?;
        writer.get_or_rotate()?;

        Ok(writer)
    }

    /// Path of the file for the given date suffix.
    fn dated_path(&self, suffix: &str) -> PathBuf {
        self.directory.join(format!("{}.{}", self.file_stem, suffix))
    }

    fn open_dated(&self, suffix: &str) -> io::Result<FileState> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.dated_path(suffix))?;
        Ok(FileState {
            file,
            date_suffix: suffix.to_string(),
        })
    }

    /// Get or create the current file, rotating on day change.
    fn get_or_rotate(&self) -> io::Result<Arc<Mutex<Option<FileState>>>> {
        let suffix = utc_date_suffix()?;
        let mut guard = self.state.lock().unwrap();

        let stale = match guard.as_ref() {
            None => None,
            Some(state) if state.date_suffix == suffix => {
                return Ok(Arc::clone(&self.state));
            }
            Some(state) => Some(state.date_suffix.clone()),
        };

        *guard = Some(self.open_dated(&suffix)?);
        drop(guard);

        if let Some(previous) = stale {
            self.archive(&previous)?;
            self.prune_archives()?;
        }

        Ok(Arc::clone(&self.state))
    }

    /// Gzip-compress the file for the given date suffix and remove the original.
    fn archive(&self, suffix: &str) -> io::Result<()> {
        let source = self.dated_path(suffix);
        if !source.exists() {
            return Ok(());
        }

        let target = PathBuf::from(format!("{}.gz", source.display()));
        let mut input = File::open(&source)?;
        let mut encoder = GzEncoder::new(File::create(&target)?, Compression::default());
        io::copy(&mut input, &mut encoder)?;
        encoder.finish()?;
        fs::remove_file(&source)?;

        Ok(())
    }

    /// Delete log files and archives older than the retention ceiling.
    ///
    /// Files whose name does not carry a parseable date suffix are left alone.
    fn prune_archives(&self) -> io::Result<()> {
        let format = time::format_description::parse(DATE_PATTERN).map_err(io::Error::other)?;
        let cutoff = OffsetDateTime::now_utc().date() - Duration::days(RETENTION_DAYS);
        let prefix = format!("{}.", self.file_stem);

        for entry in fs::read_dir(&self.directory)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().to_string();
            let Some(suffix) = name.strip_prefix(&prefix) else {
                continue;
            };
            let Ok(date) = Date::parse(suffix.trim_end_matches(".gz"), &format) else {
                continue;
            };
            if date < cutoff {
                fs::remove_file(entry.path())?;
            }
        }

        Ok(())
    }
}

impl Write for DailyRotatingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let state_arc = self.get_or_rotate()?;
        let mut guard = state_arc.lock().unwrap();

        if let Some(state) = guard.as_mut() {
            state.file.write(buf)
        } else {
            Err(io::Error::other("log file is not open"))
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        let guard = self.state.lock().unwrap();
        if let Some(state) = guard.as_ref() {
            state.file.sync_all()
        } else {
            Ok(())
        }
    }
}
