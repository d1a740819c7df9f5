use crate::completion::ShellCompleter;
use anyhow::{Context, Result};
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use std::io::{self, BufRead, IsTerminal};

/// Source of complete input lines for the interpreter.
pub trait LineSource {
    /// The next line without its terminator, or `None` at end of input.
    fn read_line(&mut self) -> Result<Option<String>>;
}

/// Interactive terminal input with line editing and Tab completion.
pub struct EditorSource {
    editor: Editor<ShellCompleter, DefaultHistory>,
    prompt: String,
}

impl EditorSource {
    pub fn new(prompt: &str) -> Result<Self> {
        let mut editor = Editor::new().context("initialising line editor")?;
        editor.set_helper(Some(ShellCompleter::new()));
        Ok(Self {
            editor,
            prompt: prompt.to_string(),
        })
    }
}

impl LineSource for EditorSource {
    fn read_line(&mut self) -> Result<Option<String>> {
        match self.editor.readline(&self.prompt) {
            Ok(line) => Ok(Some(line)),
            // Ctrl-C abandons the current line only
            Err(ReadlineError::Interrupted) => Ok(Some(String::new())),
            Err(ReadlineError::Eof) => Ok(None),
            Err(e) => Err(e).context("reading input"),
        }
    }
}

/// Non-interactive input, one line per read.
pub struct ReaderSource<R> {
    reader: R,
}

impl<R: BufRead> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> LineSource for ReaderSource<R> {
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.reader.read_line(&mut line).context("reading input")? == 0 {
            return Ok(None);
        }
        let len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(len);
        Ok(Some(line))
    }
}

/// Picks the editor for a terminal and a plain reader otherwise.
pub fn stdin_source(prompt: &str) -> Result<Box<dyn LineSource>> {
    if io::stdin().is_terminal() {
        Ok(Box::new(EditorSource::new(prompt)?))
    } else {
        Ok(Box::new(ReaderSource::new(io::stdin().lock())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_reader_yields_lines_then_eof() {
        let mut source = ReaderSource::new(Cursor::new("ls -la\r\necho hi\nlast"));
        assert_eq!(source.read_line().unwrap().as_deref(), Some("ls -la"));
        assert_eq!(source.read_line().unwrap().as_deref(), Some("echo hi"));
        assert_eq!(source.read_line().unwrap().as_deref(), Some("last"));
        assert_eq!(source.read_line().unwrap(), None);
    }

    #[test]
    fn test_blank_line_is_not_eof() {
        let mut source = ReaderSource::new(Cursor::new("\nx\n"));
        assert_eq!(source.read_line().unwrap().as_deref(), Some(""));
        assert_eq!(source.read_line().unwrap().as_deref(), Some("x"));
    }
}
