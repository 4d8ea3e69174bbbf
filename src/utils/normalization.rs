//! Normalization Utilities
//!
//! Turns category keys and entry names into the folder names used by the
//! image tree (`images/vegetables/bhendi_okra/b1.jpg`).

/// Lower-case (ASCII) and collapse each run of whitespace and parentheses
/// into a single underscore. Leading and trailing separators are dropped, so
/// `"Bhendi (Okra)"` becomes `"bhendi_okra"`.
pub fn path_segment(value: &str) -> String {
    collapse_separators(&value.to_ascii_lowercase())
}

/// Same as [`path_segment`] with full Unicode lower-casing
///
/// Identical to [`path_segment`] for ASCII input.
pub fn path_segment_full(value: &str) -> String {
    collapse_separators(&value.to_lowercase())
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || c == '(' || c == ')'
}

fn collapse_separators(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut pending = false;
    for c in value.chars() {
        if is_separator(c) {
            pending = true;
            continue;
        }
        if pending && !out.is_empty() {
            out.push('_');
        }
        pending = false;
        out.push(c);
    }
    out
}
