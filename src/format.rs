//! Template rendering.
//!
//! A template is plain text with `${name}` placeholders. Names are made of ASCII
//! letters, digits and `_`. A placeholder whose name has no binding is kept as-is,
//! and anything that does not form a complete placeholder (`${`, `${}`, `${a b}`,
//! a lone `$`) is copied literally. Rendering never fails.

use std::collections::HashMap;

/// The line layout used when none is configured. A newline is appended by the logger.
pub const DEFAULT_FORMAT: &str =
    "${now} ${traceCode} ${counter} ${level} ${funcName}[${fileName}:${lineNumber}] ${value}";

/// `${now}`: UTC timestamp
pub const NOW: &str = "now";
/// `${traceCode}`
pub const TRACE_CODE: &str = "traceCode";
/// `${counter}`: zero-padded sequence number
pub const COUNTER: &str = "counter";
/// `${level}`
pub const LEVEL: &str = "level";
/// `${funcName}`
pub const FUNC_NAME: &str = "funcName";
/// `${fileName}`
pub const FILE_NAME: &str = "fileName";
/// `${lineNumber}`
pub const LINE_NUMBER: &str = "lineNumber";
/// `${value}`: the message
pub const VALUE: &str = "value";

#[inline]
const fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Substitute every bound `${name}` in `template` in a single left-to-right pass.
///
/// Bound values are inserted verbatim and never re-scanned.
#[must_use]
pub fn render<S: core::hash::BuildHasher>(
    template: &str,
    bindings: &HashMap<&str, String, S>,
) -> String {
    let bytes = template.as_bytes();
    let mut out = String::with_capacity(template.len() + 64);
    // start of the pending literal run that has not been copied yet
    let mut literal = 0;
    let mut i = 0;

    while i + 1 < bytes.len() {
        if bytes[i] != b'$' || bytes[i + 1] != b'{' {
            i += 1;
            continue;
        }
        let name_start = i + 2;
        let name_len = bytes[name_start..]
            .iter()
            .take_while(|b| is_name_byte(**b))
            .count();
        let name_end = name_start + name_len;
        if name_len == 0 || bytes.get(name_end) != Some(&b'}') {
            // not a placeholder; the name bytes cannot contain '$', so skip them
            i = name_end;
            continue;
        }
        // delimiters are ASCII, so these are char boundaries
        if let Some(value) = bindings.get(&template[name_start..name_end]) {
            out.push_str(&template[literal..i]);
            out.push_str(value);
            literal = name_end + 1;
        }
        i = name_end + 1;
    }

    out.push_str(&template[literal..]);
    out
}
