#![allow(dead_code)]

use std::io::{self, Write};
use std::sync::{Arc, Mutex, OnceLock};

use tracelog::{CallSite, LoggerBuilder};

// Serializes tests that touch process environment
pub fn env_lock() -> &'static Mutex<()> {
    static L: OnceLock<Mutex<()>> = OnceLock::new();
    L.get_or_init(|| Mutex::new(()))
}

#[derive(Clone, Default)]
pub struct Mem(pub Arc<Mutex<Vec<u8>>>);
impl Write for Mem {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(bytes);
        Ok(bytes.len())
    }
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
impl Mem {
    #[allow(clippy::new_ret_no_self)]
    pub fn new() -> (Box<dyn Write + Send>, Arc<Mutex<Vec<u8>>>) {
        let buf = Arc::new(Mutex::new(Vec::new()));
        (Box::new(Self(buf.clone())) as Box<dyn Write + Send>, buf)
    }
}

/// Always reports the same call site
pub fn fixed_caller(function: &'static str, file: &'static str, line: u32) -> impl Fn(usize) -> CallSite + Send + Sync {
    move |_skip| CallSite::new(function, file, line)
}

/// Builder with a memory console, fixed call site and no timestamp in the template
pub fn mem_logger() -> (LoggerBuilder, Arc<Mutex<Vec<u8>>>) {
    let (w, buf) = Mem::new();
    let b = tracelog::Logger::builder()
        .writer(w)
        .trace_code("tc")
        .format("${traceCode} ${counter} ${level} ${funcName}[${fileName}:${lineNumber}] ${value}")
        .resolver(fixed_caller("app::run", "src/app.rs", 10));
    (b, buf)
}

/// Extract lines from buffer
/// # Panics
pub fn lines_from(buf: &Arc<Mutex<Vec<u8>>>) -> Vec<String> {
    let bytes = buf.lock().unwrap().clone();
    String::from_utf8(bytes)
        .unwrap()
        .lines()
        .map(std::string::ToString::to_string)
        .collect()
}
