#![warn(missing_docs, unsafe_code)]
//! A small embeddable logger.
//!
//! Every line is rendered from a `${name}` template (see [`format`]) and carries a trace
//! code, a per-logger counter, the level and the call site. Lines go to the console, to a
//! file, or both. File writes open, append, flush and close on every call, so several
//! processes can share one daily file.
//!
//! ```no_run
//! use tracelog::{Logger, DEFAULT_FORMAT};
//!
//! let code = tracelog::generate_trace_code("api", 6);
//! let logger = Logger::new(true, "/var/log/app", true, code, DEFAULT_FORMAT);
//! logger.log_info("started")?;
//! tracelog::warning!(&logger, "{} retries left", 3)?;
//! # Ok::<(), tracelog::Error>(())
//! ```

pub mod caller;
mod error;
pub mod format;
mod level;
mod logger;
mod record;
mod sink;
mod trace;

pub use caller::{CallSite, ResolveCaller, UnknownCaller};
#[cfg(feature = "stack-caller")]
pub use caller::StackResolver;
pub use error::{Error, ErrorKind, FileOp, Result};
pub use format::{render, DEFAULT_FORMAT};
pub use level::Level;
pub use logger::{Logger, LoggerBuilder, Target};
pub use record::Record;
pub use sink::{daily_path, FileTarget};
pub use trace::{generate_trace_code, DEFAULT_TRACE_CODE_LEN};

// ===== Macros (take a logger, capture the call site at compile time) ==========

#[macro_export]
#[doc(hidden)]
macro_rules! __tracelog_log {
    ($lg:expr, $lvl:expr, $($t:tt)+) => {{
        let __lg = $lg; // evaluate once
        __lg.log_at(
            $lvl,
            $crate::CallSite::new($crate::function_name!(), file!(), line!()),
            &::std::format!($($t)+),
        )
    }}
}
/// error
#[macro_export]
macro_rules! error   { ($lg:expr, $($t:tt)+) => { $crate::__tracelog_log!($lg, $crate::Level::Error,   $($t)+) } }
/// info
#[macro_export]
macro_rules! info    { ($lg:expr, $($t:tt)+) => { $crate::__tracelog_log!($lg, $crate::Level::Info,    $($t)+) } }
/// warning
#[macro_export]
macro_rules! warning { ($lg:expr, $($t:tt)+) => { $crate::__tracelog_log!($lg, $crate::Level::Warning, $($t)+) } }
