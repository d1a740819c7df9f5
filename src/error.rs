use std::io;
use std::path::PathBuf;

/// The single message shown to the user for every segment-level failure.
pub const INVALID_COMMAND: &str = "Invalid Command";

/// Exit status reported when a program cannot be launched.
pub const EXEC_FAILURE_STATUS: i32 = 127;

/// Errors that abort one segment of an input line.
///
/// None of these are fatal to the interpreter: the segment is abandoned,
/// [`INVALID_COMMAND`] is printed once and the segment counts as failed.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("redirection operator `{operator}` has no target")]
    MissingRedirectTarget { operator: String },

    #[error("cannot open {}: {source}", .path.display())]
    OpenFailed { path: PathBuf, source: io::Error },

    #[error("cannot launch `{program}`: {source}")]
    ExecNotFound { program: String, source: io::Error },

    #[error("pipes cannot be combined with redirection")]
    PipeAndRedirectConflict,

    #[error("cd: missing directory argument")]
    MissingCdArgument,

    #[error("cd: {dir}: {source}")]
    CdFailed { dir: String, source: io::Error },

    #[error("more than {limit} arguments")]
    TooManyArguments { limit: usize },

    #[error("a pipeline needs exactly two non-empty commands")]
    MalformedPipeline,

    #[error("built-in `{name}` cannot be used in a pipeline")]
    BuiltinInPipeline { name: String },

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl ShellError {
    /// Exit status the failed segment reports to the control flow.
    pub fn status(&self) -> i32 {
        match self {
            ShellError::ExecNotFound { .. } => EXEC_FAILURE_STATUS,
            _ => 1,
        }
    }
}

/// Prints the canonical diagnostic for `err` and logs its details.
pub fn report(err: &ShellError) {
    log::debug!("segment failed: {err}");
    eprintln!("{INVALID_COMMAND}");
}
