use crate::error::{self, EXEC_FAILURE_STATUS, ShellError};
use crate::pipeline::Pipeline;
use crate::redirection::OpenRedirects;
use std::process::{Child, Command, ExitStatus, Stdio};

/// Maps a finished child to a shell exit status: its exit code, or 1 when it
/// was killed by a signal.
fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(1)
}

fn command(argv: &[String]) -> Command {
    let mut cmd = Command::new(&argv[0]);
    cmd.args(&argv[1..]);
    cmd
}

fn spawn(mut cmd: Command, program: &str) -> Result<Child, ShellError> {
    log::debug!("spawning {program}");
    cmd.spawn().map_err(|source| ShellError::ExecNotFound {
        program: program.to_string(),
        source,
    })
}

/// Runs one external program and waits for it.
///
/// The redirect files become the child's stdin/stdout and are closed in this
/// process once the child is spawned, or when the spawn fails.
pub fn run_command(argv: &[String], redirects: OpenRedirects) -> Result<i32, ShellError> {
    let Some(program) = argv.first() else {
        return Ok(0);
    };

    let mut cmd = command(argv);
    if let Some(file) = redirects.stdin {
        cmd.stdin(Stdio::from(file));
    }
    if let Some(file) = redirects.stdout {
        cmd.stdout(Stdio::from(file));
    }

    let mut child = spawn(cmd, program)?;
    let status = exit_code(child.wait()?);
    log::debug!("{program} exited with {status}");
    Ok(status)
}

/// Runs `left | right` with the right side writing to this process's stdout.
pub fn run_pipeline(pipeline: &Pipeline) -> Result<i32, ShellError> {
    run_pipeline_into(pipeline, Stdio::inherit())
}

/// Runs a two-stage pipeline; the status is the right-hand program's.
///
/// Each `Command` owns its pipe end and is consumed by [`spawn`], so the
/// parent holds no pipe descriptor by the time it waits. A left side that
/// fails to launch is reported and the right side reads end of file.
pub(crate) fn run_pipeline_into(pipeline: &Pipeline, sink: Stdio) -> Result<i32, ShellError> {
    let (reader, writer) = os_pipe::pipe()?;

    let mut left_cmd = command(&pipeline.left);
    left_cmd.stdout(writer);
    let left = match spawn(left_cmd, &pipeline.left[0]) {
        Ok(child) => Some(child),
        Err(err) => {
            error::report(&err);
            None
        }
    };

    let mut right_cmd = command(&pipeline.right);
    right_cmd.stdin(reader).stdout(sink);
    let right = spawn(right_cmd, &pipeline.right[0]);

    // Reap both children before surfacing any error.
    let left_waited = left.map(|mut child| child.wait()).transpose();
    let right_waited = right.map(|mut child| child.wait());

    let left_status = left_waited?.map_or(EXEC_FAILURE_STATUS, exit_code);
    let status = exit_code(right_waited??);
    log::debug!("pipeline exited with {left_status} | {status}");
    Ok(status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::redirection::{OutputTarget, RedirectSpec, Redirection, WriteMode};
    use std::fs;

    fn argv(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    fn output_to(path: &std::path::Path, mode: WriteMode) -> OpenRedirects {
        RedirectSpec {
            redirections: vec![Redirection::Output(OutputTarget {
                path: path.to_path_buf(),
                mode,
            })],
        }
        .open()
        .unwrap()
    }

    #[test]
    fn test_exit_status_propagates() {
        assert_eq!(run_command(&argv(&["true"]), OpenRedirects::default()).unwrap(), 0);
        assert_eq!(run_command(&argv(&["false"]), OpenRedirects::default()).unwrap(), 1);
        assert_eq!(
            run_command(&argv(&["sh", "-c", "exit 7"]), OpenRedirects::default()).unwrap(),
            7
        );
    }

    #[test]
    fn test_killed_child_is_failure() {
        let status = run_command(&argv(&["sh", "-c", "kill -9 $$"]), OpenRedirects::default());
        assert_eq!(status.unwrap(), 1);
    }

    #[test]
    fn test_unknown_program() {
        let err = run_command(&argv(&["notarealcommand123"]), OpenRedirects::default())
            .unwrap_err();
        assert!(matches!(err, ShellError::ExecNotFound { .. }));
        assert_eq!(err.status(), EXEC_FAILURE_STATUS);
    }

    #[test]
    fn test_empty_argv_is_noop() {
        assert_eq!(run_command(&[], OpenRedirects::default()).unwrap(), 0);
    }

    #[test]
    fn test_redirect_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("f.txt");

        run_command(&argv(&["echo", "hello"]), output_to(&file, WriteMode::Truncate)).unwrap();
        assert_eq!(fs::read_to_string(&file).unwrap(), "hello\n");

        run_command(&argv(&["echo", "world"]), output_to(&file, WriteMode::Append)).unwrap();
        assert_eq!(fs::read_to_string(&file).unwrap(), "hello\nworld\n");

        let copy = dir.path().join("copy.txt");
        let mut redirects = output_to(&copy, WriteMode::Truncate);
        redirects.stdin = Some(fs::File::open(&file).unwrap());
        run_command(&argv(&["cat"]), redirects).unwrap();
        assert_eq!(fs::read_to_string(&copy).unwrap(), "hello\nworld\n");
    }

    #[test]
    fn test_pipeline_output_and_status() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("sorted.txt");
        let pipeline = Pipeline {
            left: argv(&["printf", "b\\na\\nc\\n"]),
            right: argv(&["sort"]),
        };
        let sink = Stdio::from(fs::File::create(&out).unwrap());

        assert_eq!(run_pipeline_into(&pipeline, sink).unwrap(), 0);
        assert_eq!(fs::read_to_string(&out).unwrap(), "a\nb\nc\n");
    }

    #[test]
    fn test_pipeline_status_is_right_side() {
        let fails_right = Pipeline {
            left: argv(&["true"]),
            right: argv(&["false"]),
        };
        assert_eq!(run_pipeline(&fails_right).unwrap(), 1);

        let fails_left = Pipeline {
            left: argv(&["false"]),
            right: argv(&["true"]),
        };
        assert_eq!(run_pipeline(&fails_left).unwrap(), 0);
    }

    #[test]
    fn test_pipeline_right_sees_eof() {
        // `wc -l` only finishes once every write end of the pipe is closed
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("count.txt");
        let pipeline = Pipeline {
            left: argv(&["echo", "one"]),
            right: argv(&["wc", "-l"]),
        };
        let sink = Stdio::from(fs::File::create(&out).unwrap());

        assert_eq!(run_pipeline_into(&pipeline, sink).unwrap(), 0);
        assert_eq!(fs::read_to_string(&out).unwrap().trim(), "1");
    }

    #[test]
    fn test_pipeline_unknown_programs() {
        let bad_left = Pipeline {
            left: argv(&["notarealcommand123"]),
            right: argv(&["cat"]),
        };
        assert_eq!(run_pipeline(&bad_left).unwrap(), 0);

        let bad_right = Pipeline {
            left: argv(&["echo", "x"]),
            right: argv(&["notarealcommand123"]),
        };
        assert!(matches!(
            run_pipeline(&bad_right),
            Err(ShellError::ExecNotFound { .. })
        ));
    }

    #[test]
    fn test_failed_right_side_still_waits_for_left() {
        // the left side only finishes its write after the call has waited on it
        let dir = tempfile::tempdir().unwrap();
        let done = dir.path().join("done");
        let script = format!("sleep 0.2; touch '{}'", done.display());
        let pipeline = Pipeline {
            left: argv(&["sh", "-c", &script]),
            right: argv(&["notarealcommand123"]),
        };

        assert!(matches!(
            run_pipeline(&pipeline),
            Err(ShellError::ExecNotFound { .. })
        ));
        assert!(done.exists());
    }
}
