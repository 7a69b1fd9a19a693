//! Number formatting matching the ru-RU locale used across the UI.

/// Thousands separator used by the ru-RU locale (no-break space).
pub const GROUP_SEPARATOR: char = '\u{a0}';

/// Format an integer count with thousands grouping and no decimals.
///
/// `1500` becomes `"1\u{a0}500"`.
#[must_use]
pub fn format_count(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(GROUP_SEPARATOR);
        }
        out.push(ch);
    }
    out
}
