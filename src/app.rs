use chrono::{DateTime, TimeDelta, Utc};
use std::env;
use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;

use crate::activator::{ActivationCommand, Activator, activate_new_block};
use crate::cli::Cli;
use crate::config::Config;
use crate::consts::{CLAUDE_CONFIG_DIR_ENV, SESSION_HOURS};
use crate::core::{evaluate, format_elapsed};
use crate::error::AppError;
use crate::output::StatusLog;
use crate::source::{find_all_log_files, resolve_claude_paths, scan_latest_activity};
use crate::utils::Timezone;

/// Everything a run needs, resolved once at startup
#[derive(Debug, Clone)]
pub(crate) struct Settings {
    pub(crate) force_activate: bool,
    pub(crate) window: TimeDelta,
    /// Raw value of `CLAUDE_CONFIG_DIR`
    pub(crate) config_dir_env: Option<OsString>,
    pub(crate) home_dir: Option<PathBuf>,
    pub(crate) timezone: Timezone,
    pub(crate) command: ActivationCommand,
}

impl Settings {
    pub(crate) fn new(cli: &Cli, config: &Config) -> Result<Self, AppError> {
        let timezone = Timezone::parse(config.timezone.as_deref())?;

        let mut command = ActivationCommand::default();
        if let Some(program) = &config.command {
            command.program = program.clone();
        }
        if let Some(args) = &config.args {
            command.args = args.clone();
        }

        Ok(Self {
            force_activate: cli.force_activate,
            window: TimeDelta::hours(SESSION_HOURS),
            config_dir_env: env::var_os(CLAUDE_CONFIG_DIR_ENV),
            home_dir: dirs::home_dir(),
            timezone,
            command,
        })
    }
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Outcome {
    /// No Claude data directory; nothing was activated
    NoDirs,
    NoFiles,
    NoTimestamp,
    /// `--force-activate` with a known last activity
    Forced,
    Active,
    Expired,
}

impl Outcome {
    pub(crate) fn activates(self) -> bool {
        !matches!(self, Outcome::NoDirs | Outcome::Active)
    }

    pub(crate) fn exit_code(self) -> u8 {
        match self {
            Outcome::NoDirs => 1,
            _ => 0,
        }
    }
}

/// Single pass: resolve dirs, scan logs, decide, maybe activate.
pub(crate) fn run<W: Write>(
    settings: &Settings,
    clock: impl Fn() -> DateTime<Utc>,
    activator: &mut dyn Activator,
    log: &mut StatusLog<W>,
) -> Result<Outcome, AppError> {
    if settings.force_activate {
        log.line("🚀 Force activation mode")?;
    }
    log.line("🔍 Checking Claude block status...")?;

    let claude_paths = resolve_claude_paths(
        settings.config_dir_env.as_deref(),
        settings.home_dir.as_deref(),
    );
    if claude_paths.is_empty() {
        log.line("❌ No Claude data directory found")?;
        return Ok(Outcome::NoDirs);
    }

    let files = find_all_log_files(&claude_paths);
    log.line(format_args!(
        "📁 {} directories, {} files",
        claude_paths.len(),
        files.len()
    ))?;

    if files.is_empty() {
        log.line("⚠️ No usage data, activating new block")?;
        activate_new_block(activator, log)?;
        return Ok(Outcome::NoFiles);
    }

    let Some(latest) = scan_latest_activity(&files).latest else {
        log.line("⚠️ No valid activity timestamp, activating new block")?;
        activate_new_block(activator, log)?;
        return Ok(Outcome::NoTimestamp);
    };
    tracing::debug!(
        "Latest activity {} in {}",
        latest.timestamp,
        latest.path.display()
    );

    let state = evaluate(clock(), latest.timestamp, settings.window);
    let last_seen = log.timezone().format_civil(latest.timestamp);
    log.line(format_args!(
        "⏰ Last activity: {} ({} ago)",
        last_seen,
        format_elapsed(state.elapsed())
    ))?;

    let outcome = if settings.force_activate {
        log.line("🔧 Force activation mode, running Claude command")?;
        activate_new_block(activator, log)?;
        Outcome::Forced
    } else if state.is_active() {
        log.line(format_args!(
            "✅ Active block: {} (${})",
            latest.model_or_unknown(),
            latest.cost_usd()
        ))?;
        Outcome::Active
    } else {
        log.line("❌ Block expired, activating new block")?;
        activate_new_block(activator, log)?;
        Outcome::Expired
    };

    log.line("✨ Check complete")?;
    log.blank()?;
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ActivationError;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    #[derive(Default)]
    struct CountingActivator {
        calls: usize,
        fail: bool,
    }

    impl Activator for CountingActivator {
        fn activate(&mut self) -> Result<(), ActivationError> {
            self.calls += 1;
            if self.fail {
                Err(ActivationError::NotFound {
                    program: "claude".to_string(),
                })
            } else {
                Ok(())
            }
        }
    }

    fn settings(home: &Path, force_activate: bool) -> Settings {
        Settings {
            force_activate,
            window: TimeDelta::hours(SESSION_HOURS),
            config_dir_env: None,
            home_dir: Some(home.to_path_buf()),
            timezone: Timezone::Named(chrono_tz::UTC),
            command: ActivationCommand::default(),
        }
    }

    fn write_log(home: &Path, rel: &str, content: &str) {
        let path = home.join(".claude/projects").join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn at(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    fn run_once(
        settings: &Settings,
        now: DateTime<Utc>,
        activator: &mut CountingActivator,
    ) -> (Outcome, String) {
        let mut log = StatusLog::new(Vec::new(), settings.timezone);
        let outcome = run(settings, || now, activator, &mut log).unwrap();
        (outcome, String::from_utf8(log.into_inner()).unwrap())
    }

    const LATEST: &str = r#"{"timestamp":"2025-06-01T10:00:00Z","costUSD":0.25,"message":{"model":"claude-sonnet-4-20250514"}}"#;

    #[test]
    fn no_dirs_exits_one_without_activation() {
        let home = TempDir::new().unwrap();
        let mut activator = CountingActivator::default();
        let (outcome, out) = run_once(
            &settings(home.path(), false),
            at("2025-06-01T10:00:00Z"),
            &mut activator,
        );

        assert_eq!(outcome, Outcome::NoDirs);
        assert_eq!(outcome.exit_code(), 1);
        assert_eq!(activator.calls, 0);
        assert!(out.contains("No Claude data directory found"));
    }

    #[test]
    fn no_dirs_even_when_forced() {
        let home = TempDir::new().unwrap();
        let mut activator = CountingActivator::default();
        let (outcome, out) = run_once(
            &settings(home.path(), true),
            at("2025-06-01T10:00:00Z"),
            &mut activator,
        );

        assert_eq!(outcome, Outcome::NoDirs);
        assert_eq!(activator.calls, 0);
        assert!(out.contains("🚀 Force activation mode"));
    }

    #[test]
    fn no_files_activates_once() {
        let home = TempDir::new().unwrap();
        fs::create_dir_all(home.path().join(".claude/projects/empty")).unwrap();
        let mut activator = CountingActivator::default();
        let (outcome, out) = run_once(
            &settings(home.path(), false),
            at("2025-06-01T10:00:00Z"),
            &mut activator,
        );

        assert_eq!(outcome, Outcome::NoFiles);
        assert_eq!(outcome.exit_code(), 0);
        assert_eq!(activator.calls, 1);
        assert!(out.contains("📁 1 directories, 0 files"));
        assert!(out.contains("No usage data"));
        assert!(!out.contains("Check complete"));
    }

    #[test]
    fn no_timestamp_activates_once() {
        let home = TempDir::new().unwrap();
        write_log(home.path(), "p/s.jsonl", "{\"type\":\"summary\"}\nnot json\n");
        let mut activator = CountingActivator::default();
        let (outcome, out) = run_once(
            &settings(home.path(), false),
            at("2025-06-01T10:00:00Z"),
            &mut activator,
        );

        assert_eq!(outcome, Outcome::NoTimestamp);
        assert_eq!(activator.calls, 1);
        assert!(out.contains("No valid activity timestamp"));
    }

    #[test]
    fn active_block_just_under_five_hours() {
        let home = TempDir::new().unwrap();
        write_log(home.path(), "p/s.jsonl", LATEST);
        let now = at("2025-06-01T15:00:00Z") - TimeDelta::milliseconds(1);
        let mut activator = CountingActivator::default();
        let (outcome, out) = run_once(&settings(home.path(), false), now, &mut activator);

        assert_eq!(outcome, Outcome::Active);
        assert!(!outcome.activates());
        assert_eq!(activator.calls, 0);
        assert!(out.contains("⏰ Last activity: 2025-06-01T10:00:00 (04:59 ago)"));
        assert!(out.contains("✅ Active block: claude-sonnet-4-20250514 ($0.25)"));
        assert!(out.ends_with("✨ Check complete\n\n"));
    }

    #[test]
    fn expired_block_at_exactly_five_hours() {
        let home = TempDir::new().unwrap();
        write_log(home.path(), "p/s.jsonl", LATEST);
        let mut activator = CountingActivator::default();
        let (outcome, out) = run_once(
            &settings(home.path(), false),
            at("2025-06-01T15:00:00Z"),
            &mut activator,
        );

        assert_eq!(outcome, Outcome::Expired);
        assert_eq!(activator.calls, 1);
        assert!(out.contains("(05:00 ago)"));
        assert!(out.contains("Block expired"));
        assert!(out.contains("New block activated"));
    }

    #[test]
    fn forced_with_zero_elapsed() {
        let home = TempDir::new().unwrap();
        write_log(home.path(), "p/s.jsonl", LATEST);
        let mut activator = CountingActivator::default();
        let (outcome, out) = run_once(
            &settings(home.path(), true),
            at("2025-06-01T10:00:00Z"),
            &mut activator,
        );

        assert_eq!(outcome, Outcome::Forced);
        assert_eq!(activator.calls, 1);
        assert!(out.contains("(00:00 ago)"));
        assert!(out.contains("🔧 Force activation mode, running Claude command"));
        assert!(!out.contains("Active block"));
    }

    #[test]
    fn failed_activation_still_completes() {
        let home = TempDir::new().unwrap();
        write_log(home.path(), "p/s.jsonl", LATEST);
        let mut activator = CountingActivator {
            fail: true,
            ..Default::default()
        };
        let (outcome, out) = run_once(
            &settings(home.path(), false),
            at("2025-06-02T10:00:00Z"),
            &mut activator,
        );

        assert_eq!(outcome, Outcome::Expired);
        assert_eq!(outcome.exit_code(), 0);
        assert_eq!(activator.calls, 1);
        assert!(out.contains("❌ Activation failed: claude not found."));
        assert!(out.contains("✨ Check complete"));
    }

    #[test]
    fn latest_across_directories_and_garbage_lines() {
        let root = TempDir::new().unwrap();
        let home = root.path().join("home");
        write_log(
            &home,
            "a/old.jsonl",
            "{\"timestamp\":\"2025-06-01T08:00:00Z\"}\n{broken\n",
        );
        let extra = root.path().join("extra");
        let newer = extra.join("projects/b/new.jsonl");
        fs::create_dir_all(newer.parent().unwrap()).unwrap();
        fs::write(
            &newer,
            "{\"timestamp\":\"2025-06-01T12:30:00Z\",\"message\":{\"model\":\"opus\"}}\n",
        )
        .unwrap();

        let mut s = settings(&home, false);
        s.config_dir_env = Some(extra.clone().into_os_string());
        let mut activator = CountingActivator::default();
        let (outcome, out) = run_once(&s, at("2025-06-01T14:35:00Z"), &mut activator);

        assert_eq!(outcome, Outcome::Active);
        assert!(out.contains("📁 2 directories, 2 files"));
        assert!(out.contains("(02:05 ago)"));
        assert!(out.contains("Active block: opus ($0)"));
    }

    #[test]
    fn unknown_model_when_record_has_none() {
        let home = TempDir::new().unwrap();
        write_log(home.path(), "p/s.jsonl", r#"{"timestamp":"2025-06-01T10:00:00Z"}"#);
        let mut activator = CountingActivator::default();
        let (_, out) = run_once(
            &settings(home.path(), false),
            at("2025-06-01T10:59:00Z"),
            &mut activator,
        );

        assert!(out.contains("(00:59 ago)"));
        assert!(out.contains("Active block: unknown ($0)"));
    }

    #[test]
    fn settings_from_config() {
        let cli = Cli {
            force_activate: true,
        };
        let config = Config {
            debug: false,
            timezone: Some("UTC".to_string()),
            command: Some("true".to_string()),
            args: Some(vec![]),
        };
        let s = Settings::new(&cli, &config).unwrap();
        assert!(s.force_activate);
        assert_eq!(s.window, TimeDelta::hours(5));
        assert_eq!(s.timezone, Timezone::Named(chrono_tz::UTC));
        assert_eq!(s.command.program, "true");
        assert!(s.command.args.is_empty());
    }

    #[test]
    fn settings_defaults() {
        let s = Settings::new(&Cli { force_activate: false }, &Config::default()).unwrap();
        assert_eq!(s.timezone, Timezone::default());
        assert_eq!(s.command, ActivationCommand::default());
    }

    #[test]
    fn settings_reject_bad_timezone() {
        let config = Config {
            timezone: Some("Mars/Olympus".to_string()),
            ..Default::default()
        };
        let err = Settings::new(&Cli { force_activate: false }, &config).unwrap_err();
        assert!(matches!(err, AppError::InvalidTimezone { .. }));
    }

    #[test]
    fn outcome_activation_table() {
        assert!(!Outcome::NoDirs.activates());
        assert!(Outcome::NoFiles.activates());
        assert!(Outcome::NoTimestamp.activates());
        assert!(Outcome::Forced.activates());
        assert!(!Outcome::Active.activates());
        assert!(Outcome::Expired.activates());
    }
}
