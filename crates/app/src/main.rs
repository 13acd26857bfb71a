use std::{io, path::Path, process::ExitCode};

use snapshot::Ledger;

mod commands;
mod error;
mod render;
mod settings;
mod snapshot;
mod views;

fn main() -> ExitCode {
    let (settings, command) = match settings::load() {
        Ok(loaded) => loaded,
        Err(err) => {
            eprintln!("failed to load settings: {err}");
            return ExitCode::FAILURE;
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "spese={level},engine={level}",
            level = settings.level
        ))
        .with_writer(io::stderr)
        .init();

    match run(&settings, &command) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            tracing::error!("{command:?} failed: {err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(settings: &settings::Settings, command: &settings::Command) -> error::Result<bool> {
    let engine = engine::Engine::builder()
        .remainder_policy(settings.remainder_policy()?)
        .build();

    // `equal-split` needs no data.
    let ledger = match command {
        settings::Command::EqualSplit { .. } => Ledger::default(),
        _ => Ledger::from_snapshot(snapshot::read(Path::new(&settings.data))?)?,
    };

    let output = commands::run(&engine, &ledger, command)?;
    render::write(&mut io::stdout().lock(), settings.format, &output)?;
    Ok(output.is_success())
}
