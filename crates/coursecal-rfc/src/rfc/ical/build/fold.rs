//! iCalendar line folding.

/// Maximum line length in octets (not characters) per RFC 5545 §3.1.
const MAX_LINE_OCTETS: usize = 75;

/// Folds a content line to the maximum length.
///
/// Lines longer than 75 octets are folded by inserting `line_ending`
/// followed by a single space. Folds at UTF-8 character boundaries.
#[must_use]
pub fn fold_line(line: &str, line_ending: &str) -> String {
    if line.len() <= MAX_LINE_OCTETS {
        return line.to_string();
    }

    let mut result = String::with_capacity(line.len() + line.len() / MAX_LINE_OCTETS * 3);
    let mut current_len = 0;

    for c in line.chars() {
        let char_len = c.len_utf8();

        if current_len + char_len > MAX_LINE_OCTETS {
            result.push_str(line_ending);
            result.push(' ');
            current_len = 1; // The space
        }

        result.push(c);
        current_len += char_len;
    }

    result
}
