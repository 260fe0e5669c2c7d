// src/core/sanitize.rs
use crate::error::ExtractError;

/// Collapse whitespace runs to single spaces and trim the ends.
pub fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Strict day-of-month parse. Anything but ASCII digits is an extraction failure;
/// no leading-digit coercion.
pub fn parse_day(raw: &str) -> Result<u32, ExtractError> {
    let t = raw.trim();
    if t.is_empty() || !t.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ExtractError::BadDayField(s!(t)));
    }
    t.parse::<u32>().map_err(|_| ExtractError::BadDayField(s!(t)))
}

/// Value after the first `=` of a data-url (`…panjika.html?date=15/01/2020`).
pub fn value_after_eq(url: &str) -> Option<&str> {
    let v = url.split('=').nth(1)?.trim();
    if v.is_empty() { None } else { Some(v) }
}

/// File-name stem: alphanumerics kept, whitespace runs become one `_`.
pub fn sanitize_stem(name: &str, fallback: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_us = false;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() { out.push(ch.to_ascii_lowercase()); last_us = false; }
        else if ch.is_whitespace() { if !last_us { out.push('_'); last_us = true; } }
        else if ch=='-' || ch=='_' { if !(last_us && ch=='_') { out.push(ch); } last_us = ch=='_'; }
    }
    let out = out.trim_matches('_').to_string();
    if out.is_empty() { s!(fallback) } else { out }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_day_accepts_digits_only() {
        assert_eq!(parse_day(" 14 ").unwrap(), 14);
        assert!(matches!(parse_day("14th"), Err(ExtractError::BadDayField(_))));
        assert!(matches!(parse_day(""), Err(ExtractError::BadDayField(_))));
        assert!(matches!(parse_day("+3"), Err(ExtractError::BadDayField(_))));
    }

    #[test]
    fn value_after_eq_takes_second_segment() {
        assert_eq!(value_after_eq("/bengali/day.html?date=15/01/2020"), Some("15/01/2020"));
        assert_eq!(value_after_eq("/bengali/day.html"), None);
        assert_eq!(value_after_eq("/x?date="), None);
    }

    #[test]
    fn whitespace_collapses() {
        assert_eq!(normalize_ws("  Magh\n\t 1426  "), "Magh 1426");
    }

    #[test]
    fn stem_is_lowercase_and_collapsed() {
        assert_eq!(sanitize_stem("  Bengali  Solar ", "calendar"), "bengali_solar");
        assert_eq!(sanitize_stem("***", "calendar"), "calendar");
    }
}
