const DELIMITERS: [char; 5] = [' ', '\t', '\r', '\n', '\x07'];

/// Splits a line into whitespace-delimited words.
///
/// Comment lines produce no words at all, so callers can treat a comment
/// exactly like a blank line.
pub fn tokenize(line: &str) -> impl Iterator<Item = &str> {
    let body = if is_comment(line) { "" } else { line };
    body.split(DELIMITERS).filter(|word| !word.is_empty())
}

/// A `#` in the first column makes the whole line a comment.
pub fn is_comment(line: &str) -> bool {
    line.starts_with('#')
}
