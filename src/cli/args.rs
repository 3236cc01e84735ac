//! CLI argument definitions

use std::ffi::OsString;

use clap::Parser;

use crate::error::AppError;

#[derive(Debug, Parser)]
#[command(name = "block-keeper")]
#[command(
    about = "Keep a Claude Code 5-hour block active",
    long_about = "Checks the latest activity in the local Claude Code usage logs and runs \
                  the Claude CLI once when no 5-hour block is active.\n\n\
                  Status lines go to stdout; redirect them to keep a log:\n  \
                  block-keeper >> block-keeper.log 2>&1",
    version
)]
pub(crate) struct Cli {
    /// Run the activation command even when a block is still active
    #[arg(long)]
    pub(crate) force_activate: bool,
}

impl Cli {
    /// Parse the process arguments.
    ///
    /// `--help` and `--version` print and exit 0 as usual. Any other parse
    /// error is printed to stderr and returned, so it ends the run with
    /// status 1 like every other top-level error.
    pub(crate) fn parse_args() -> Result<Self, AppError> {
        Self::parse_args_from(std::env::args_os())
    }

    fn parse_args_from<I, T>(args: I) -> Result<Self, AppError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        match Self::try_parse_from(args) {
            Ok(cli) => Ok(cli),
            Err(e) if !e.use_stderr() => e.exit(),
            Err(e) => {
                let _ = e.print();
                Err(AppError::InvalidArguments {
                    message: usage_summary(&e),
                })
            }
        }
    }
}

/// First line of clap's rendered error, without the "error: " prefix
fn usage_summary(err: &clap::Error) -> String {
    let rendered = err.render().to_string();
    let first = rendered.lines().next().unwrap_or_default().trim();
    first.strip_prefix("error:").unwrap_or(first).trim().to_string()
}
