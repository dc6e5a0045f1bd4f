use std::collections::HashMap;

use time::macros::format_description;
use time::OffsetDateTime;

use crate::caller::CallSite;
use crate::error::Result;
use crate::format::{self, COUNTER, FILE_NAME, FUNC_NAME, LEVEL, LINE_NUMBER, NOW, TRACE_CODE, VALUE};
use crate::Level;

/// One log call, captured before it is rendered.
#[derive(Clone, Debug)]
pub struct Record<'a> {
    /// Creation instant, UTC
    pub timestamp: OffsetDateTime,
    /// Trace code of the owning logger at call time
    pub trace_code: &'a str,
    /// Counter value at call time
    pub sequence: u64,
    /// Severity
    pub level: Level,
    /// Attributed call site
    pub caller: CallSite,
    /// Caller's message
    pub message: &'a str,
}

impl Record<'_> {
    /// RFC 3339 timestamp at second precision, e.g. `2024-01-02T15:04:05Z`.
    /// # Errors
    /// Returns an error if the timestamp cannot be formatted.
    pub fn timestamp_text(&self) -> Result<String> {
        let fmt = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]Z");
        Ok(self.timestamp.to_offset(time::UtcOffset::UTC).format(fmt)?)
    }

    /// Placeholder bindings for this record.
    /// # Errors
    /// Returns an error if the timestamp cannot be formatted.
    pub fn bindings(&self) -> Result<HashMap<&'static str, String>> {
        Ok(HashMap::from([
            (NOW, self.timestamp_text()?),
            (TRACE_CODE, self.trace_code.to_owned()),
            (COUNTER, format!("{:04}", self.sequence)),
            (LEVEL, self.level.as_str().to_owned()),
            (FUNC_NAME, self.caller.function.clone()),
            (FILE_NAME, self.caller.file.clone()),
            (LINE_NUMBER, self.caller.line.to_string()),
            (VALUE, self.message.to_owned()),
        ]))
    }

    /// Render with `template` and terminate with a newline.
    /// # Errors
    /// Returns an error if the timestamp cannot be formatted.
    pub fn render(&self, template: &str) -> Result<String> {
        let mut line = format::render(template, &self.bindings()?);
        line.push('\n');
        Ok(line)
    }
}
