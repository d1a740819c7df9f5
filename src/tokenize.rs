use crate::error::ShellError;

/// One word of a command segment.
///
/// `quoted` is set when the word came from a `"..."` group; quoted words are
/// never treated as redirection operators or wildcard patterns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub quoted: bool,
}

impl Token {
    pub fn bare(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            quoted: false,
        }
    }

    pub fn quoted(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            quoted: true,
        }
    }
}

/// Splits a segment into words on whitespace, honoring double-quote groups.
///
/// A word starting with `"` runs to the next unescaped `"` (or the end of the
/// segment when unterminated) and has the quotes stripped. Any other word runs
/// to the next unquoted whitespace; a `"` inside it opens a span whose quotes
/// are dropped, so `a";"b` is the single word `a;b`. Words never merge:
/// `"ab"cd` is two tokens.
///
/// At most `max_args` tokens are accepted; one more is a
/// [`ShellError::TooManyArguments`] error rather than a silent drop.
pub fn tokenize(input: &str, max_args: usize) -> Result<Vec<Token>, ShellError> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        let Some(&first) = chars.peek() else {
            break;
        };

        let token = if first == '"' {
            chars.next();
            let mut text = String::new();
            let mut prev = None;
            for c in chars.by_ref() {
                if c == '"' && prev != Some('\\') {
                    break;
                }
                text.push(c);
                prev = Some(c);
            }
            Token::quoted(text)
        } else {
            let mut text = String::new();
            let (mut quoted, mut in_quotes, mut prev) = (false, false, None);
            while let Some(c) = chars.next_if(|&c| in_quotes || !c.is_whitespace()) {
                if c == '"' && prev != Some('\\') {
                    in_quotes = !in_quotes;
                    quoted = true;
                } else {
                    text.push(c);
                }
                prev = Some(c);
            }
            Token { text, quoted }
        };

        if tokens.len() == max_args {
            return Err(ShellError::TooManyArguments { limit: max_args });
        }
        tokens.push(token);
    }

    Ok(tokens)
}
