mod activator;
mod app;
mod cli;
mod config;
mod consts;
mod core;
mod error;
mod logging;
mod output;
mod source;
mod utils;

use std::io::{self, Write};
use std::process::ExitCode;

use chrono::Utc;

use activator::CommandActivator;
use app::{Settings, run};
use cli::Cli;
use config::Config;
use error::AppError;
use logging::{install_panic_hook, setup_logging};
use output::StatusLog;
use utils::Timezone;

/// Last line of defense: anything that reaches here ends the run with status 1
fn report_exception<W: Write>(log: &mut StatusLog<W>, err: &AppError) -> ExitCode {
    tracing::error!("{err}");
    // stdout itself may be the thing that failed
    let _ = log.line(format_args!("💥 Exception: {err}"));
    ExitCode::FAILURE
}

fn main() -> ExitCode {
    install_panic_hook(Timezone::default());
    let cli = Cli::parse_args();

    let loaded = Config::load();
    setup_logging(loaded.config.debug);
    loaded.report();

    let stdout = io::stdout();
    let settings = match cli.and_then(|cli| Settings::new(&cli, &loaded.config)) {
        Ok(settings) => settings,
        Err(e) => {
            let mut log = StatusLog::new(stdout.lock(), Timezone::default());
            return report_exception(&mut log, &e);
        }
    };
    install_panic_hook(settings.timezone);

    let mut log = StatusLog::new(stdout.lock(), settings.timezone);
    let mut activator = CommandActivator::new(settings.command.clone());

    match run(&settings, Utc::now, &mut activator, &mut log) {
        Ok(outcome) => {
            tracing::debug!(?outcome, activated = outcome.activates(), "Run finished");
            ExitCode::from(outcome.exit_code())
        }
        Err(e) => report_exception(&mut log, &e),
    }
}
