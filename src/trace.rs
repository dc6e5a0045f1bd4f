use rand::Rng;

/// Length used when a trace code is generated without an explicit size.
pub const DEFAULT_TRACE_CODE_LEN: usize = 6;

const ALPHABET: &[u8; 36] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Generate a random `[a-z0-9]` code of exactly `length` characters.
///
/// With a non-empty `prefix` the result is `prefix.code`. Not cryptographically
/// secure and not guaranteed unique; pick `length` for the collision odds you need.
#[must_use]
pub fn generate_trace_code(prefix: &str, length: usize) -> String {
    let mut rng = rand::thread_rng();
    let code: String = (0..length)
        .map(|_| char::from(ALPHABET[rng.gen_range(0..ALPHABET.len())]))
        .collect();
    if prefix.is_empty() {
        code
    } else {
        format!("{prefix}.{code}")
    }
}
