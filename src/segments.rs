/// Separator that follows a segment on the input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Separator {
    /// `;` or end of line: the next segment always runs.
    Sequential,
    /// `&&`: the next segment runs only if this one succeeded.
    AndThen,
}

/// A trimmed piece of the input line between separators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub separator: Separator,
}

impl Segment {
    fn new(text: &str, separator: Separator) -> Self {
        Self {
            text: text.trim().to_string(),
            separator,
        }
    }
}

/// Yields the characters of `text` that lie outside double quotes, with
/// their byte offsets. Quote characters themselves are not yielded; a quote
/// preceded by a backslash does not toggle.
pub(crate) fn unquoted_chars(text: &str) -> impl Iterator<Item = (usize, char)> + '_ {
    let mut in_quotes = false;
    let mut prev = None;
    text.char_indices().filter(move |&(_, c)| {
        let escaped = prev == Some('\\');
        prev = Some(c);
        if c == '"' && !escaped {
            in_quotes = !in_quotes;
            return false;
        }
        !in_quotes
    })
}

/// Splits a line on unquoted `;` and `&&`.
///
/// Always yields at least one segment. The last segment is `Sequential`; a
/// trailing separator therefore produces a final empty segment.
pub fn split_segments(line: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut start = 0;
    let mut chars = unquoted_chars(line).peekable();

    while let Some((i, c)) = chars.next() {
        let (separator, width) = match c {
            ';' => (Separator::Sequential, 1),
            '&' if chars.next_if(|&(j, n)| n == '&' && j == i + 1).is_some() => {
                (Separator::AndThen, 2)
            }
            _ => continue,
        };
        segments.push(Segment::new(&line[start..i], separator));
        start = i + width;
    }
    segments.push(Segment::new(&line[start..], Separator::Sequential));

    log::debug!("split {line:?} into {segments:?}");
    segments
}
