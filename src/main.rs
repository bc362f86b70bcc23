mod cli;
mod constant;
mod explorer;
mod key_events;
mod logging;
mod navigator;
mod ui;

use std::{io, process::ExitCode};

use clap::Parser;
use color_eyre::eyre::Result;
use ui::{FileSelector, Outcome};

fn main() -> ExitCode {
    let args = cli::Args::parse();
    let _log_guard = match logging::init() {
        Ok(guard) => Some(guard),
        Err(error) => {
            eprintln!("warning: logging disabled: {error:#}");
            None
        }
    };

    match run(args) {
        Ok(outcome) => match outcome.report(&mut io::stdout().lock()) {
            Ok(status) => ExitCode::from(status),
            Err(error) => {
                tracing::error!(%error, "failed to write the selection");
                eprintln!("Error: failed to write the selection: {error}");
                ExitCode::from(2)
            }
        },
        Err(error) => {
            tracing::error!("{error:#}");
            eprintln!("Error: {error:?}");
            ExitCode::from(2)
        }
    }
}

fn run(args: cli::Args) -> Result<Outcome> {
    color_eyre::install()?;
    let config = args.into_config()?;
    tracing::info!(
        dir = %config.start_dir.display(),
        filters = ?config.filters.suffixes(),
        "starting"
    );

    let file = FileSelector::new(config)?;
    let mut terminal = ui::init_terminal()?;
    let outcome = file.run(&mut terminal);
    finish(outcome, ui::restore_terminal())
}

/// A terminal that fails to restore must not cost the user their selection.
fn finish(outcome: Result<Outcome>, restored: Result<()>) -> Result<Outcome> {
    if let Err(error) = restored {
        tracing::warn!("{error:#}");
        eprintln!("warning: failed to restore the terminal: {error:#}");
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use color_eyre::eyre::eyre;
    use std::path::PathBuf;

    #[test]
    fn restore_failure_keeps_the_selection() {
        let picked = Outcome::Selected(PathBuf::from("/tmp/pic.png"));
        let outcome = finish(Ok(picked.clone()), Err(eyre!("tty gone"))).unwrap();
        assert_eq!(outcome, picked);
    }

    #[test]
    fn run_error_is_returned_after_restore() {
        let outcome = finish(Err(eyre!("draw failed")), Ok(()));
        assert!(outcome.is_err());
    }
}
