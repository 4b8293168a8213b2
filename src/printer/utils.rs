use unicode_width::UnicodeWidthStr;

/// Display width, in columns, of the text's final line.
///
/// For single-line text this is the full width; for text containing
/// newlines it is the column the cursor lands on after emitting it.
#[inline]
pub fn string_width(text: &str) -> usize {
    match text.rfind('\n') {
        Some(index) => text[index + 1..].width(),
        None => text.width(),
    }
}

/// Width of the blank run (spaces and tabs) at the end of the line after
/// emitting `text`, given the blank run accumulated before it.
#[inline]
pub fn blank_tail_width(tail: usize, text: &str) -> usize {
    if text.is_empty() {
        return tail;
    }

    let stripped = text.trim_end_matches([' ', '\t']);
    if stripped.is_empty() { tail + text.len() } else { text.len() - stripped.len() }
}
