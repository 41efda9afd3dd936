//! Value escaping (RFC 5545 §3.2, §3.3.11).

/// Escapes a TEXT value.
///
/// Backslash, semicolon and comma are backslash-escaped and line breaks
/// (`\n`, `\r\n` or a lone `\r`) become the two characters `\n`. Other
/// control characters except HTAB are not permitted in TEXT and are dropped.
#[must_use]
pub fn escape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' => result.push_str("\\\\"),
            ';' => result.push_str("\\;"),
            ',' => result.push_str("\\,"),
            '\n' => result.push_str("\\n"),
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                result.push_str("\\n");
            }
            '\t' => result.push('\t'),
            c if c.is_control() => {}
            c => result.push(c),
        }
    }

    result
}

/// Escapes a parameter value.
///
/// Parameter values cannot contain DQUOTE, so those are removed. Values
/// containing `:`, `;` or `,` are wrapped in double quotes so the content
/// line splits correctly.
#[must_use]
pub fn escape_param_value(s: &str) -> String {
    let cleaned: String = s
        .chars()
        .filter(|c| *c != '"' && (!c.is_control() || *c == '\t'))
        .collect();

    if cleaned.contains([':', ';', ',']) {
        format!("\"{cleaned}\"")
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_unchanged() {
        assert_eq!(escape_text("Lecture - Derivatives"), "Lecture - Derivatives");
    }

    #[test]
    fn special_characters_escaped() {
        assert_eq!(escape_text("Module1; Lecture"), "Module1\\; Lecture");
        assert_eq!(escape_text("a,b"), "a\\,b");
        assert_eq!(escape_text("C:\\path"), "C:\\\\path");
    }

    #[test]
    fn colon_needs_no_escape_in_text() {
        assert_eq!(escape_text("Time: 19:00"), "Time: 19:00");
    }

    #[test]
    fn newlines_normalized() {
        assert_eq!(escape_text("line1\nline2"), "line1\\nline2");
        assert_eq!(escape_text("line1\r\nline2"), "line1\\nline2");
        assert_eq!(escape_text("line1\rline2"), "line1\\nline2");
    }

    #[test]
    fn control_characters_dropped() {
        assert_eq!(escape_text("a\u{7}b\tc"), "ab\tc");
    }

    #[test]
    fn param_value_quoting() {
        assert_eq!(escape_param_value("Europe/London"), "Europe/London");
        assert_eq!(escape_param_value("Custom:Zone"), "\"Custom:Zone\"");
        assert_eq!(escape_param_value("a\"b;c"), "\"ab;c\"");
    }
}
