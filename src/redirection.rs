use crate::error::ShellError;
use crate::tokenize::Token;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

/// How an output redirection target is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    Truncate,
    Append,
}

/// Output target of a `>` or `>>` redirection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTarget {
    pub path: PathBuf,
    pub mode: WriteMode,
}

/// One `<`, `>` or `>>` operator with its target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Redirection {
    Input(PathBuf),
    Output(OutputTarget),
}

/// Redirections requested by one command, in the order they were written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RedirectSpec {
    pub redirections: Vec<Redirection>,
}

/// A parsed command with arguments and redirections.
#[derive(Debug, Default)]
pub struct ParsedCommand {
    pub args: Vec<Token>,
    pub redirects: RedirectSpec,
}

/// Opened redirection files, handed to the spawned process or built-in.
///
/// Dropping this closes whatever is still held, so every exit path of a
/// segment releases its descriptors.
#[derive(Debug, Default)]
pub struct OpenRedirects {
    pub stdin: Option<File>,
    pub stdout: Option<File>,
}

/// Parses tokens into a ParsedCommand, extracting redirection operators.
///
/// Only unquoted `<`, `>` and `>>` are operators; each consumes the following
/// token as its target.
pub fn parse_command(tokens: Vec<Token>) -> Result<ParsedCommand, ShellError> {
    let mut args = Vec::new();
    let mut redirections = Vec::new();
    let mut tokens = tokens.into_iter();

    while let Some(token) = tokens.next() {
        let mode = match token.text.as_str() {
            _ if token.quoted => None,
            "<" => {
                redirections.push(Redirection::Input(target(&token, tokens.next())?));
                continue;
            }
            ">" => Some(WriteMode::Truncate),
            ">>" => Some(WriteMode::Append),
            _ => None,
        };

        match mode {
            Some(mode) => {
                let path = target(&token, tokens.next())?;
                redirections.push(Redirection::Output(OutputTarget { path, mode }));
            }
            None => args.push(token),
        }
    }

    Ok(ParsedCommand {
        args,
        redirects: RedirectSpec { redirections },
    })
}

fn target(operator: &Token, next: Option<Token>) -> Result<PathBuf, ShellError> {
    next.map(|t| PathBuf::from(t.text))
        .ok_or_else(|| ShellError::MissingRedirectTarget {
            operator: operator.text.clone(),
        })
}

impl RedirectSpec {
    pub fn is_empty(&self) -> bool {
        self.redirections.is_empty()
    }

    /// Opens every target left to right: inputs read-only, outputs created
    /// with mode 0644 and truncated or appended.
    ///
    /// A later redirection in the same direction replaces and closes the
    /// earlier file, which has still been created or truncated. The first
    /// failure stops the scan; files opened before it are closed.
    pub fn open(&self) -> Result<OpenRedirects, ShellError> {
        let mut opened = OpenRedirects::default();
        for redirection in &self.redirections {
            match redirection {
                Redirection::Input(path) => opened.stdin = Some(open_input(path)?),
                Redirection::Output(target) => opened.stdout = Some(open_output(target)?),
            }
        }
        Ok(opened)
    }
}

fn open_input(path: &Path) -> Result<File, ShellError> {
    File::open(path).map_err(|source| ShellError::OpenFailed {
        path: path.to_path_buf(),
        source,
    })
}

fn open_output(target: &OutputTarget) -> Result<File, ShellError> {
    let mut options = OpenOptions::new();
    options.write(true).create(true);
    match target.mode {
        WriteMode::Truncate => options.truncate(true),
        WriteMode::Append => options.append(true),
    };
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o644);
    }

    options
        .open(&target.path)
        .map_err(|source| ShellError::OpenFailed {
            path: target.path.clone(),
            source,
        })
}
