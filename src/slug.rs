/// Separator placed between alphanumeric runs of a lookup key.
pub const KEY_SEPARATOR: char = '-';

/// Canonical lookup key for a display name, e.g. `"Mikel Brown Jr."` -> `"mikel-brown-jr"`.
///
/// Apostrophes (ASCII and U+2019) are dropped without leaving a separator, every
/// other run of characters outside `[a-z0-9]` collapses to a single `-`, and the
/// key never starts or ends with a separator.
pub fn normalize_name(input: &str) -> String {
    let lower = input.to_lowercase();
    let lower = lower.trim();
    let mut out = String::with_capacity(lower.len());
    let mut prev_sep = false;
    for ch in lower.chars() {
        if is_apostrophe(ch) {
            continue;
        }
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            out.push(ch);
            prev_sep = false;
        } else if !prev_sep && !out.is_empty() {
            out.push(KEY_SEPARATOR);
            prev_sep = true;
        }
    }
    while out.ends_with(KEY_SEPARATOR) {
        out.pop();
    }
    out
}

fn is_apostrophe(ch: char) -> bool {
    matches!(ch, '\'' | '\u{2019}')
}
