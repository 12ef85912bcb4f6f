//! String utilities for the domain layer.

/// Single-line preview of a possibly multi-line text (UTF-8 safe)
///
/// Whitespace runs (including newlines) collapse to one space. The result is
/// at most `max_chars` characters, the last three being `...` when cut.
pub fn preview(s: &str, max_chars: usize) -> String {
    let flat = s.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max_chars {
        return flat;
    }
    let keep = max_chars.saturating_sub(3);
    let mut out: String = flat.chars().take(keep).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_short_text_unchanged() {
        assert_eq!(preview("hello", 10), "hello");
    }

    #[test]
    fn test_preview_flattens_newlines() {
        assert_eq!(preview("def f():\n    return 1", 40), "def f(): return 1");
    }

    #[test]
    fn test_preview_truncates() {
        assert_eq!(preview("hello world", 8), "hello...");
    }

    #[test]
    fn test_preview_multibyte() {
        assert_eq!(preview("日本語テスト文字列", 7), "日本語テ...");
    }
}
