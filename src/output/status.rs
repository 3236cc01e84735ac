use chrono::{DateTime, Utc};
use std::fmt::Display;
use std::io::{self, Write};

use crate::utils::Timezone;

/// Timestamped status lines: `[2025-01-15T13:45:09] message`
pub(crate) struct StatusLog<W: Write> {
    out: W,
    timezone: Timezone,
}

impl<W: Write> StatusLog<W> {
    pub(crate) fn new(out: W, timezone: Timezone) -> Self {
        Self { out, timezone }
    }

    pub(crate) fn timezone(&self) -> Timezone {
        self.timezone
    }

    pub(crate) fn line(&mut self, message: impl Display) -> io::Result<()> {
        self.line_at(Utc::now(), message)
    }

    fn line_at(&mut self, now: DateTime<Utc>, message: impl Display) -> io::Result<()> {
        writeln!(self.out, "[{}] {}", self.timezone.format_civil(now), message)?;
        self.out.flush()
    }

    /// Bare empty line separating runs in an appended log file
    pub(crate) fn blank(&mut self) -> io::Result<()> {
        writeln!(self.out)?;
        self.out.flush()
    }

    #[cfg(test)]
    pub(crate) fn into_inner(self) -> W {
        self.out
    }
}
