use crate::error::ShellError;
use crate::tokenize::Token;
use glob::{MatchOptions, glob_with};

const WILDCARDS: &[char] = &['*', '?', '['];

// Leading dots must be matched literally, as with POSIX glob(3).
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

fn has_wildcard(text: &str) -> bool {
    text.contains(WILDCARDS)
}

/// Expands unquoted wildcard arguments against the filesystem.
///
/// Matches replace the pattern in sorted order. A pattern that matches
/// nothing, or is not a valid pattern, is kept as the literal argument.
pub fn expand_wildcards(args: Vec<Token>, max_args: usize) -> Result<Vec<String>, ShellError> {
    let mut expanded = Vec::with_capacity(args.len());

    for arg in args {
        if arg.quoted || !has_wildcard(&arg.text) {
            expanded.push(arg.text);
        } else {
            let matches = matching_paths(&arg.text);
            if matches.is_empty() {
                log::debug!("no match for {:?}, keeping it literal", arg.text);
                expanded.push(arg.text);
            } else {
                expanded.extend(matches);
            }
        }

        if expanded.len() > max_args {
            return Err(ShellError::TooManyArguments { limit: max_args });
        }
    }

    Ok(expanded)
}

fn matching_paths(pattern: &str) -> Vec<String> {
    match glob_with(pattern, MATCH_OPTIONS) {
        Ok(paths) => paths
            .flatten()
            .map(|p| p.to_string_lossy().into_owned())
            .collect(),
        Err(e) => {
            log::debug!("bad pattern {pattern:?}: {e}");
            Vec::new()
        }
    }
}
