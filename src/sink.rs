use std::io::{self, Write};
use std::net::UdpSocket;
use std::path::Path;
use std::sync::{Arc, RwLock};

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};

use crate::record::{LogRecord, format_line, format_line_colored};
use crate::writer::DailyRotatingWriter;
use crate::{Error, Level, LogConfig, Result};

/// Shared error hook invoked on sink transport failures.
///
/// Transport errors are non-fatal: the hook observes them and logging
/// continues. The default hook prints to the diagnostic channel.
#[derive(Clone)]
pub(crate) struct ErrorHook {
    inner: Arc<RwLock<Box<dyn Fn(&Error) + Send + Sync>>>,
}

impl ErrorHook {
    pub(crate) fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Box::new(|error| {
                eprintln!("logger error: {error}");
            }))),
        }
    }

    pub(crate) fn replace(&self, callback: impl Fn(&Error) + Send + Sync + 'static) {
        *self.inner.write().unwrap() = Box::new(callback);
    }

    pub(crate) fn emit(&self, error: &Error) {
        (self.inner.read().unwrap())(error);
    }
}

/// An output destination for formatted log lines.
pub trait Sink: Send + Sync {
    /// Least-severe level this sink still emits.
    fn min_level(&self) -> Level;

    /// Write one record. Must not panic or propagate transport errors.
    fn emit(&self, record: &LogRecord);
}

/// Colorized sink writing to standard output. Always present.
pub struct ConsoleSink {
    level: Level,
    hook: ErrorHook,
}

impl ConsoleSink {
    pub(crate) fn new(level: Level, hook: ErrorHook) -> Self {
        Self { level, hook }
    }
}

impl Sink for ConsoleSink {
    fn min_level(&self) -> Level {
        self.level
    }

    fn emit(&self, record: &LogRecord) {
        let line = format_line_colored(record);
        let mut stdout = io::stdout().lock();
        if let Err(error) = writeln!(stdout, "{line}") {
            self.hook.emit(&Error::Io(error));
        }
    }
}

/// Writer adapter that reports I/O failures through the error hook and
/// swallows them, so the non-blocking worker never tears anything down.
struct HookedWriter<W: Write> {
    inner: W,
    hook: ErrorHook,
}

impl<W: Write> Write for HookedWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.inner.write(buf) {
            Ok(written) => Ok(written),
            Err(error) => {
                self.hook.emit(&Error::Io(error));
                Ok(buf.len())
            }
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        if let Err(error) = self.inner.flush() {
            self.hook.emit(&Error::Io(error));
        }
        Ok(())
    }
}

/// Daily-rotating file sink. Present only when a directory is configured.
///
/// Writes go through a non-blocking worker thread; from the caller's
/// perspective they are fire-and-forget and complete shortly after the call.
pub struct FileSink {
    level: Level,
    writer: NonBlocking,
    hook: ErrorHook,
    _guard: WorkerGuard,
}

impl FileSink {
    pub(crate) fn new(
        directory: &Path,
        file_stem: &str,
        level: Level,
        hook: ErrorHook,
    ) -> Result<Self> {
        let writer = DailyRotatingWriter::new(directory, file_stem)?;
        let (non_blocking, guard) = tracing_appender::non_blocking(HookedWriter {
            inner: writer,
            hook: hook.clone(),
        });

        Ok(Self {
            level,
            writer: non_blocking,
            hook,
            _guard: guard,
        })
    }
}

impl Sink for FileSink {
    fn min_level(&self) -> Level {
        self.level
    }

    fn emit(&self, record: &LogRecord) {
        // One write_all per line keeps the record atomic in the worker queue.
        let line = format!("{}\n", format_line(record));
        let mut writer = self.writer.clone();
        if let Err(error) = writer.write_all(line.as_bytes()) {
            self.hook.emit(&Error::Io(error));
        }
    }
}

/// Experimental UDP syslog sink, present when a syslog server is configured.
///
/// Sends the same line format as one datagram per record. No delivery
/// guarantee and no working contract beyond best-effort send.
pub struct SyslogSink {
    level: Level,
    socket: UdpSocket,
    address: String,
    hook: ErrorHook,
}

impl SyslogSink {
    pub(crate) fn new(server: &str, port: u16, level: Level, hook: ErrorHook) -> Result<Self> {
        let socket = UdpSocket::bind("0.0.0.0:0")?;
        Ok(Self {
            level,
            socket,
            address: format!("{server}:{port}"),
            hook,
        })
    }
}

impl Sink for SyslogSink {
    fn min_level(&self) -> Level {
        self.level
    }

    fn emit(&self, record: &LogRecord) {
        let line = format_line(record);
        if let Err(error) = self.socket.send_to(line.as_bytes(), &self.address) {
            self.hook.emit(&Error::Io(error));
        }
    }
}

/// Assemble the active sinks for a config: console always, file when a
/// directory is set, syslog when a server is set.
pub(crate) fn build_sinks(config: &LogConfig, hook: &ErrorHook) -> Result<Vec<Box<dyn Sink>>> {
    let mut sinks: Vec<Box<dyn Sink>> = vec![Box::new(ConsoleSink::new(
        config.console_level(),
        hook.clone(),
    ))];

    if let Some(directory) = config.file_directory() {
        sinks.push(Box::new(FileSink::new(
            directory,
            config.file_stem(),
            config.file_level(),
            hook.clone(),
        )?));
    }

    if let Some(server) = config.syslog_server.as_deref() {
        sinks.push(Box::new(SyslogSink::new(
            server,
            config.syslog_port.unwrap_or(514),
            config.file_level(),
            hook.clone(),
        )?));
    }

    Ok(sinks)
}
