//! Per-element text cleanup: drops page furniture and joins lines.

/// Line boundaries recognised when splitting raw parser text. Form feeds and
/// the unicode line/paragraph separators show up in PDF text layers.
fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0B' | '\x0C' | '\x1C' | '\x1D' | '\x1E' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Page markers either lead with "page " ("Page 3 of 12") or end in a
/// running footer such as "Draft report, page 3".
fn is_page_marker(line: &str) -> bool {
    let leading = line
        .get(..5)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("page "));
    if leading {
        return true;
    }
    let mut words = line.split_whitespace().rev();
    match (words.next(), words.next()) {
        (Some(number), Some(word)) => {
            number.chars().all(|c| c.is_ascii_digit()) && word.eq_ignore_ascii_case("page")
        }
        _ => false,
    }
}

/// `true` for lines that are layout artifacts rather than content:
/// page markers, bare page numbers and lone hyphen rules.
pub(crate) fn is_noise_line(line: &str) -> bool {
    let is_page_number = line.chars().all(|c| c.is_ascii_digit());
    is_page_number || line == "-" || is_page_marker(line)
}

/// Clean one element's raw text into a single line.
///
/// Lines are trimmed, empty and noise lines are dropped, and the survivors are
/// joined with a single space in their original order. An empty result means
/// the element has no content worth emitting.
pub fn normalize_text(raw: &str) -> String {
    raw.split(is_line_break)
        .map(str::trim)
        .filter(|line| !line.is_empty() && !is_noise_line(line))
        .collect::<Vec<_>>()
        .join(" ")
}
