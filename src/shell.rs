use crate::commands::{Builtin, Flow, execute_builtin};
use crate::config::Config;
use crate::error::{self, ShellError};
use crate::history::History;
use crate::pipeline::{Job, SimpleCommand, build_job};
use crate::process;
use crate::segments::{Separator, split_segments};
use std::io;

/// The read-eval state carried between input lines.
pub struct Shell {
    history: History,
    max_args: usize,
}

impl Shell {
    pub fn new(config: &Config) -> Self {
        Self {
            history: History::with_capacity(config.history_capacity),
            max_args: config.max_args,
        }
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Handles one line from the user: records it in the history and runs it.
    /// Blank lines do nothing.
    pub fn submit(&mut self, line: &str) -> Flow {
        let line = line.trim();
        if line.is_empty() {
            return Flow::Continue(0);
        }
        self.history.push(line);
        self.execute_line(line)
    }

    /// Runs every segment of a line in order.
    ///
    /// A failed segment followed by `&&` skips the chain of `&&`-joined
    /// segments after it; execution resumes after the next `;`. Returns the
    /// status of the last segment that ran.
    pub fn execute_line(&mut self, line: &str) -> Flow {
        let mut status = 0;
        let mut skipping = false;

        for segment in split_segments(line) {
            if skipping {
                log::debug!("skipping {:?}", segment.text);
                skipping = segment.separator == Separator::AndThen;
                continue;
            }

            status = match self.execute_segment(&segment.text) {
                Ok(Flow::Continue(status)) => status,
                Ok(Flow::Exit) => return Flow::Exit,
                Err(err) => {
                    error::report(&err);
                    err.status()
                }
            };
            skipping = status != 0 && segment.separator == Separator::AndThen;
        }

        Flow::Continue(status)
    }

    fn execute_segment(&mut self, text: &str) -> Result<Flow, ShellError> {
        if text.is_empty() {
            return Ok(Flow::Continue(0));
        }

        match build_job(text, self.max_args)? {
            Job::Simple(cmd) => self.execute_simple(cmd),
            Job::Pipeline(pipeline) => {
                for side in [&pipeline.left, &pipeline.right] {
                    if Builtin::lookup(&side[0]).is_some() {
                        return Err(ShellError::BuiltinInPipeline {
                            name: side[0].clone(),
                        });
                    }
                }
                process::run_pipeline(&pipeline).map(Flow::Continue)
            }
        }
    }

    fn execute_simple(&mut self, cmd: SimpleCommand) -> Result<Flow, ShellError> {
        let redirects = cmd.redirects.open()?;
        let Some(builtin) = cmd.argv.first().and_then(|name| Builtin::lookup(name)) else {
            return process::run_command(&cmd.argv, redirects).map(Flow::Continue);
        };

        // Built-ins never read stdin; only `history` writes output.
        match redirects.stdout {
            Some(mut file) => execute_builtin(builtin, &cmd.argv, &mut self.history, &mut file),
            None => execute_builtin(builtin, &cmd.argv, &mut self.history, &mut io::stdout()),
        }
    }
}
