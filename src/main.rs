mod commands;
mod completion;
mod config;
mod error;
mod expand;
mod history;
mod input;
mod pipeline;
mod process;
mod redirection;
mod segments;
mod shell;
mod tokenize;

use commands::Flow;
use config::Config;
use shell::Shell;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = Config::load();
    let mut shell = Shell::new(&config);
    let mut source = input::stdin_source(&config.prompt)?;

    while let Some(line) = source.read_line()? {
        if shell.submit(&line) == Flow::Exit {
            break;
        }
    }

    log::debug!("leaving with {} history entries", shell.history().len());
    Ok(())
}
