use crate::error::ShellError;
use crate::history::History;
use std::env;
use std::io::Write;

/// List of builtin commands
pub const BUILTINS: &[&str] = &["cd", "history", "exit"];

/// A command run inside the interpreter instead of a child process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Cd,
    History,
    Exit,
}

impl Builtin {
    pub fn lookup(name: &str) -> Option<Self> {
        match name {
            "cd" => Some(Builtin::Cd),
            "history" => Some(Builtin::History),
            "exit" => Some(Builtin::Exit),
            _ => None,
        }
    }
}

/// What the interpreter does after a command finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep going; carries the command's exit status.
    Continue(i32),
    /// Stop the interactive loop.
    Exit,
}

/// Executes a builtin command. `args` includes the command name.
pub fn execute_builtin(
    builtin: Builtin,
    args: &[String],
    history: &mut History,
    out: &mut dyn Write,
) -> Result<Flow, ShellError> {
    match builtin {
        Builtin::Cd => execute_cd(args),
        Builtin::History => execute_history(args, history, out),
        Builtin::Exit => {
            history.clear();
            Ok(Flow::Exit)
        }
    }
}

fn execute_cd(args: &[String]) -> Result<Flow, ShellError> {
    let dir = args.get(1).ok_or(ShellError::MissingCdArgument)?;
    env::set_current_dir(dir).map_err(|source| ShellError::CdFailed {
        dir: dir.clone(),
        source,
    })?;
    log::debug!("working directory is now {dir}");
    Ok(Flow::Continue(0))
}

/// `history [n]`: a count that is not a number prints everything.
fn execute_history(
    args: &[String],
    history: &History,
    out: &mut dyn Write,
) -> Result<Flow, ShellError> {
    let n = args.get(1).map_or(0, |arg| leading_int(arg));
    for line in history.recent(n) {
        writeln!(out, "{line}")?;
    }
    out.flush()?;
    Ok(Flow::Continue(0))
}

/// Reads a count the way C `atoi` does: optional whitespace and sign, then
/// digits up to the first non-digit. No digits or an overflow gives 0.
fn leading_int(arg: &str) -> i64 {
    let arg = arg.trim_start();
    let sign_len = usize::from(arg.starts_with(['+', '-']));
    let digits_end = arg[sign_len..]
        .find(|c: char| !c.is_ascii_digit())
        .map_or(arg.len(), |i| sign_len + i);
    arg[..digits_end].parse().unwrap_or(0)
}
