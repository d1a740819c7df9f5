use crate::commands::BUILTINS;
use rustyline::Helper;
use rustyline::completion::{Completer, FilenameCompleter, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use std::env;

/// Tab completion: built-ins and `PATH` programs for the first word of a
/// segment, filenames everywhere else.
pub struct ShellCompleter {
    filename_completer: FilenameCompleter,
}

impl ShellCompleter {
    pub fn new() -> Self {
        Self {
            filename_completer: FilenameCompleter::new(),
        }
    }
}

impl Completer for ShellCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        ctx: &rustyline::Context<'_>,
    ) -> Result<(usize, Vec<Self::Candidate>), ReadlineError> {
        let (start, word) = extract_word(line, pos);
        if !is_command_position(&line[..start]) {
            return self.filename_completer.complete(line, pos, ctx);
        }

        let mut candidates: Vec<Pair> = BUILTINS
            .iter()
            .map(|b| b.to_string())
            .chain(path_programs(word))
            .filter(|name| name.starts_with(word))
            .map(|name| Pair {
                replacement: format!("{name} "),
                display: name,
            })
            .collect();

        candidates.sort_by(|a, b| a.display.cmp(&b.display));
        candidates.dedup_by(|a, b| a.display == b.display);
        Ok((start, candidates))
    }
}

fn path_programs(prefix: &str) -> Vec<String> {
    let Some(path) = env::var_os("PATH") else {
        return Vec::new();
    };
    env::split_paths(&path)
        .filter_map(|dir| std::fs::read_dir(dir).ok())
        .flat_map(|entries| entries.flatten())
        .filter_map(|e| e.file_name().into_string().ok())
        .filter(|name| name.starts_with(prefix))
        .collect()
}

/// True when the text before the current word ends a segment or pipe stage,
/// so the word names a program.
fn is_command_position(before: &str) -> bool {
    let before = before.trim_end();
    before.is_empty() || before.ends_with([';', '|']) || before.ends_with("&&")
}

fn extract_word(line: &str, pos: usize) -> (usize, &str) {
    let before = &line[..pos];
    let start = before.rfind(char::is_whitespace).map_or(0, |i| i + 1);
    (start, &line[start..pos])
}

impl Helper for ShellCompleter {}
impl Hinter for ShellCompleter {
    type Hint = String;
}
impl Highlighter for ShellCompleter {}
impl Validator for ShellCompleter {}
