use crate::error::ShellError;
use crate::expand::expand_wildcards;
use crate::redirection::{RedirectSpec, parse_command};
use crate::segments::unquoted_chars;
use crate::tokenize::tokenize;

/// A single command with its expanded argv and requested redirections.
#[derive(Debug, Default)]
pub struct SimpleCommand {
    pub argv: Vec<String>,
    pub redirects: RedirectSpec,
}

/// Two commands, the first's stdout feeding the second's stdin.
#[derive(Debug)]
pub struct Pipeline {
    pub left: Vec<String>,
    pub right: Vec<String>,
}

/// What one segment resolves to.
#[derive(Debug)]
pub enum Job {
    Simple(SimpleCommand),
    Pipeline(Pipeline),
}

/// Resolves a segment into a simple command or a two-stage pipeline.
///
/// Pipelines may not carry redirections on either side, and only one
/// unquoted `|` is supported.
pub fn build_job(segment: &str, max_args: usize) -> Result<Job, ShellError> {
    let pipes: Vec<usize> = unquoted_chars(segment)
        .filter(|&(_, c)| c == '|')
        .map(|(i, _)| i)
        .collect();

    let job = match pipes.as_slice() {
        [] => Job::Simple(build_command(segment, max_args)?),
        [at] => {
            let left = build_command(segment[..*at].trim(), max_args)?;
            let right = build_command(segment[at + 1..].trim(), max_args)?;
            if !left.redirects.is_empty() || !right.redirects.is_empty() {
                return Err(ShellError::PipeAndRedirectConflict);
            }
            if left.argv.is_empty() || right.argv.is_empty() {
                return Err(ShellError::MalformedPipeline);
            }
            Job::Pipeline(Pipeline {
                left: left.argv,
                right: right.argv,
            })
        }
        _ => return Err(ShellError::MalformedPipeline),
    };

    log::debug!("resolved {segment:?} to {job:?}");
    Ok(job)
}

fn build_command(text: &str, max_args: usize) -> Result<SimpleCommand, ShellError> {
    let parsed = parse_command(tokenize(text, max_args)?)?;
    Ok(SimpleCommand {
        argv: expand_wildcards(parsed.args, max_args)?,
        redirects: parsed.redirects,
    })
}
