use std::hint::black_box;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex as StdMutex, PoisonError};

use time::{Date, OffsetDateTime};

use crate::caller::{CallSite, ResolveCaller};
use crate::error::{Error, Result};
use crate::format::DEFAULT_FORMAT;
use crate::record::Record;
use crate::sink::{self, FileTarget};
use crate::trace::generate_trace_code;
use crate::Level;

/// Console destination
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Target {
    /// stdout
    Stdout,
    /// stderr
    Stderr,
    /// custom writer
    Writer,
}

struct Sink {
    target: Target,
    writer: Option<Box<dyn Write + Send>>,
}

impl Sink {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        match self.target {
            Target::Stdout => {
                let mut out = io::stdout().lock();
                out.write_all(line.as_bytes())?;
                out.flush()
            }
            Target::Stderr => {
                let mut err = io::stderr().lock();
                err.write_all(line.as_bytes())?;
                err.flush()
            }
            Target::Writer => match self.writer.as_mut() {
                Some(w) => {
                    w.write_all(line.as_bytes())?;
                    w.flush()
                }
                None => Ok(()),
            },
        }
    }
}

struct State {
    counter: u64,
    console: Sink,
}

/// A configured logger.
///
/// Each line is rendered from the format template, written to the console if enabled,
/// appended to the file target if one is set, and then the counter advances. The counter
/// shown in a line is its value *before* that line, so a fresh logger starts at `0000`.
///
/// All of that happens under one lock, so a `Logger` can be shared between threads and
/// line numbers stay unique and in file order.
pub struct Logger {
    console_enabled: bool,
    file_path: Option<PathBuf>,
    create_if_missing: bool,
    trace_code: String,
    format: String,
    sync: bool,
    fatal: bool,
    resolver: Box<dyn ResolveCaller>,
    state: StdMutex<State>,
}

impl core::fmt::Debug for Logger {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Logger")
            .field("console_enabled", &self.console_enabled)
            .field("file_path", &self.file_path)
            .field("create_if_missing", &self.create_if_missing)
            .field("trace_code", &self.trace_code)
            .field("format", &self.format)
            .field("counter", &self.counter())
            .finish_non_exhaustive()
    }
}

impl Logger {
    /// Create a logger.
    ///
    /// A non-empty `dir` selects daily files: lines go to `<dir>/<YYYYMMDD>.log`, with the
    /// UTC date taken now and kept for the logger's lifetime. An empty `dir` disables the
    /// file sink. No I/O happens here.
    #[must_use]
    pub fn new(
        console_enabled: bool,
        dir: impl AsRef<Path>,
        create_if_missing: bool,
        trace_code: impl Into<String>,
        format: impl Into<String>,
    ) -> Self {
        let dir = dir.as_ref();
        let mut b = Self::builder()
            .console(console_enabled)
            .create_if_missing(create_if_missing)
            .trace_code(trace_code)
            .format(format);
        if !dir.as_os_str().is_empty() {
            b = b.dir(dir);
        }
        b.build()
    }

    #[inline]
    #[must_use]
    /// Create a new `LoggerBuilder`
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::default()
    }

    /// Trace code stamped on every line
    #[must_use]
    pub fn trace_code(&self) -> &str {
        &self.trace_code
    }

    /// Format template
    #[must_use]
    pub fn format(&self) -> &str {
        &self.format
    }

    /// Resolved file, if the file sink is enabled
    #[must_use]
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Value the next line will carry
    #[must_use]
    pub fn counter(&self) -> u64 {
        self.state().counter
    }

    /// Start counting from zero again. The trace code is untouched.
    pub fn reset_counter(&self) {
        self.state().counter = 0;
    }

    // Each wrapper below is one real frame in every profile: `#[inline(never)]`, and
    // `black_box` so the call into `log` is never a tail call.

    /// Log at ERROR, attributed to the caller.
    /// # Errors
    /// See [`Logger::log_at`].
    #[inline(never)]
    pub fn log_error(&self, message: &str) -> Result<()> {
        black_box(self.log(message, Level::Error, 1))
    }

    /// Log at INFO, attributed to the caller.
    /// # Errors
    /// See [`Logger::log_at`].
    #[inline(never)]
    pub fn log_info(&self, message: &str) -> Result<()> {
        black_box(self.log(message, Level::Info, 1))
    }

    /// Log at WARNING, attributed to the caller.
    /// # Errors
    /// See [`Logger::log_at`].
    #[inline(never)]
    pub fn log_warning(&self, message: &str) -> Result<()> {
        black_box(self.log(message, Level::Warning, 1))
    }

    /// Log at ERROR, attributed to the frame `skip` levels above the caller.
    /// # Errors
    /// See [`Logger::log_at`].
    #[inline(never)]
    pub fn log_inner_error(&self, message: &str, skip: usize) -> Result<()> {
        black_box(self.log(message, Level::Error, skip.saturating_add(1)))
    }

    /// Log at INFO, attributed to the frame `skip` levels above the caller.
    /// # Errors
    /// See [`Logger::log_at`].
    #[inline(never)]
    pub fn log_inner_info(&self, message: &str, skip: usize) -> Result<()> {
        black_box(self.log(message, Level::Info, skip.saturating_add(1)))
    }

    /// Log at WARNING, attributed to the frame `skip` levels above the caller.
    /// # Errors
    /// See [`Logger::log_at`].
    #[inline(never)]
    pub fn log_inner_warning(&self, message: &str, skip: usize) -> Result<()> {
        black_box(self.log(message, Level::Warning, skip.saturating_add(1)))
    }

    /// Log with the call site `skip` frames above this call; `0` is the direct caller.
    /// # Errors
    /// See [`Logger::log_at`].
    #[inline(never)]
    pub fn log(&self, message: &str, level: Level, skip: usize) -> Result<()> {
        let caller = self.resolver.resolve(skip.saturating_add(1));
        self.log_at(level, caller, message)
    }

    /// Render and emit one line for an already known call site.
    /// # Errors
    /// Returns an error if the console or file write fails, or the file is missing while
    /// creation is disabled. The counter still advances once the line is rendered.
    /// # Panics
    /// In fatal mode the error is raised as a panic instead.
    pub fn log_at(&self, level: Level, caller: CallSite, message: &str) -> Result<()> {
        let res = self.emit(level, caller, message);
        if self.fatal {
            if let Err(e) = &res {
                panic!("{e}");
            }
        }
        res
    }

    fn emit(&self, level: Level, caller: CallSite, message: &str) -> Result<()> {
        let mut state = self.state();
        let record = Record {
            timestamp: OffsetDateTime::now_utc(),
            trace_code: &self.trace_code,
            sequence: state.counter,
            level,
            caller,
            message,
        };
        let line = record.render(&self.format)?;
        state.counter += 1;

        if self.console_enabled {
            state.console.write_line(&line).map_err(Error::Console)?;
        }
        if let Some(path) = &self.file_path {
            sink::append_line(path, &line, self.create_if_missing, self.sync)?;
        }
        Ok(())
    }

    fn state(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Builder for `Logger`
pub struct LoggerBuilder {
    console: bool,
    target: Target,
    writer: Option<Box<dyn Write + Send>>,
    file: FileTarget,
    date: Option<Date>,
    create_if_missing: bool,
    trace_code: String,
    format: String,
    sync: bool,
    fatal: bool,
    resolver: Option<Box<dyn ResolveCaller>>,
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self {
            console: false,
            target: Target::Stderr,
            writer: None,
            file: FileTarget::None,
            date: None,
            create_if_missing: true,
            trace_code: String::new(),
            format: DEFAULT_FORMAT.to_owned(),
            sync: false,
            fatal: false,
            resolver: None,
        }
    }
}

impl LoggerBuilder {
    /// Start from defaults and apply `TRACELOG_*` environment variables.
    ///
    /// `TRACELOG_CONSOLE`, `TRACELOG_CREATE`, `TRACELOG_SYNC` and `TRACELOG_FATAL` are
    /// booleans (`1` or `true`). `TRACELOG_DIR` selects daily files, `TRACELOG_FILE` a fixed
    /// file; if both are set the fixed file wins. `TRACELOG_TRACE_CODE` sets the trace
    /// code, otherwise `TRACELOG_TRACE_PREFIX` generates one. `TRACELOG_FORMAT` replaces
    /// the template.
    #[must_use]
    pub fn from_env() -> Self {
        let mut b = Self::default();
        if let Some(on) = env_bool("TRACELOG_CONSOLE") {
            b = b.console(on);
        }
        if let Some(on) = env_bool("TRACELOG_CREATE") {
            b = b.create_if_missing(on);
        }
        if let Some(on) = env_bool("TRACELOG_SYNC") {
            b = b.sync(on);
        }
        if let Some(on) = env_bool("TRACELOG_FATAL") {
            b = b.fatal(on);
        }
        if let Some(dir) = env_non_empty("TRACELOG_DIR") {
            b = b.dir(dir);
        }
        if let Some(file) = env_non_empty("TRACELOG_FILE") {
            b = b.file(file);
        }
        if let Some(code) = env_non_empty("TRACELOG_TRACE_CODE") {
            b = b.trace_code(code);
        } else if let Ok(prefix) = std::env::var("TRACELOG_TRACE_PREFIX") {
            b = b.generated_trace_code(&prefix, crate::DEFAULT_TRACE_CODE_LEN);
        }
        if let Some(format) = env_non_empty("TRACELOG_FORMAT") {
            b = b.format(format);
        }
        b
    }

    #[inline]
    #[must_use]
    /// Print lines to the console target
    pub const fn console(mut self, on: bool) -> Self {
        self.console = on;
        self
    }
    #[inline]
    #[must_use]
    /// Console output goes to stdout
    pub const fn stdout(mut self) -> Self {
        self.target = Target::Stdout;
        self
    }
    #[inline]
    #[must_use]
    /// Console output goes to stderr
    pub const fn stderr(mut self) -> Self {
        self.target = Target::Stderr;
        self
    }
    #[inline]
    #[must_use]
    /// Console output goes to a custom writer; enables the console
    pub fn writer(mut self, w: Box<dyn Write + Send>) -> Self {
        self.console = true;
        self.target = Target::Writer;
        self.writer = Some(w);
        self
    }
    #[inline]
    #[must_use]
    /// Append to one `YYYYMMDD.log` per UTC day inside `dir`
    pub fn dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.file = FileTarget::Daily(dir.as_ref().to_owned());
        self
    }
    #[inline]
    #[must_use]
    /// Append to a fixed file
    pub fn file(mut self, p: impl AsRef<Path>) -> Self {
        self.file = FileTarget::File(p.as_ref().to_owned());
        self
    }
    #[inline]
    #[must_use]
    /// Calendar date for daily file names (default: today, UTC)
    pub const fn date(mut self, d: Date) -> Self {
        self.date = Some(d);
        self
    }
    #[inline]
    #[must_use]
    /// Create the file and its directories on first write (default: true)
    pub const fn create_if_missing(mut self, on: bool) -> Self {
        self.create_if_missing = on;
        self
    }
    #[inline]
    #[must_use]
    /// Trace code stamped on every line
    pub fn trace_code(mut self, code: impl Into<String>) -> Self {
        self.trace_code = code.into();
        self
    }
    #[inline]
    #[must_use]
    /// Use a freshly generated trace code
    pub fn generated_trace_code(self, prefix: &str, length: usize) -> Self {
        self.trace_code(generate_trace_code(prefix, length))
    }
    #[inline]
    #[must_use]
    /// Line template, see [`crate::format`]
    pub fn format(mut self, template: impl Into<String>) -> Self {
        self.format = template.into();
        self
    }
    #[inline]
    #[must_use]
    /// `sync_data` the file after every line
    pub const fn sync(mut self, on: bool) -> Self {
        self.sync = on;
        self
    }
    #[inline]
    #[must_use]
    /// Panic on write failures instead of returning them
    pub const fn fatal(mut self, on: bool) -> Self {
        self.fatal = on;
        self
    }
    #[inline]
    #[must_use]
    /// Replace the call-site resolver
    pub fn resolver(mut self, r: impl ResolveCaller + 'static) -> Self {
        self.resolver = Some(Box::new(r));
        self
    }

    /// Build the logger. Resolves the file path; touches nothing on disk.
    #[must_use]
    pub fn build(self) -> Logger {
        let today = self
            .date
            .unwrap_or_else(|| OffsetDateTime::now_utc().date());
        Logger {
            console_enabled: self.console,
            file_path: self.file.resolve(today),
            create_if_missing: self.create_if_missing,
            trace_code: self.trace_code,
            format: self.format,
            sync: self.sync,
            fatal: self.fatal,
            resolver: self.resolver.unwrap_or_else(default_resolver),
            state: StdMutex::new(State {
                counter: 0,
                console: Sink {
                    target: self.target,
                    writer: self.writer,
                },
            }),
        }
    }

    /// Build the logger and leak it
    #[must_use]
    pub fn build_static(self) -> &'static Logger {
        Box::leak(Box::new(self.build()))
    }
}

fn default_resolver() -> Box<dyn ResolveCaller> {
    #[cfg(feature = "stack-caller")]
    {
        Box::new(crate::caller::StackResolver)
    }
    #[cfg(not(feature = "stack-caller"))]
    {
        Box::new(crate::caller::UnknownCaller)
    }
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|s| !s.is_empty())
}

fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .map(|s| s == "1" || s.eq_ignore_ascii_case("true"))
}
