//! Diagnostic logging on stderr
//!
//! Status lines for the user go to stdout through `output::StatusLog`.
//! This subscriber only carries debug/warn events (skipped files, config
//! problems) and stays quiet unless asked.

use std::any::Any;
use std::io;
use std::panic::{self, PanicHookInfo};

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::AppError;
use crate::output::StatusLog;
use crate::utils::Timezone;

fn default_directive(debug: bool) -> &'static str {
    if debug {
        "block_keeper=debug"
    } else {
        "block_keeper=warn"
    }
}

pub(crate) fn setup_logging(debug: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(debug)));

    // A second init (tests, embedding) is not an error worth surfacing
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init();
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

fn panic_error(info: &PanicHookInfo<'_>) -> AppError {
    let mut message = panic_message(info.payload());
    if let Some(location) = info.location() {
        message = format!("{message} at {}:{}", location.file(), location.line());
    }
    AppError::Panic { message }
}

/// Route panics through the status log and exit 1 instead of aborting.
///
/// Calling it again replaces the hook, so the timezone can be updated once
/// the config is known.
pub(crate) fn install_panic_hook(timezone: Timezone) {
    panic::set_hook(Box::new(move |info| {
        let err = panic_error(info);
        tracing::error!("{err}");
        let mut log = StatusLog::new(io::stdout().lock(), timezone);
        let _ = log.line(format_args!("💥 Exception: {err}"));
        std::process::exit(1);
    }));
}
