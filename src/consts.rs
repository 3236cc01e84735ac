/// Length of one Claude billing block, in hours
pub(crate) const SESSION_HOURS: i64 = 5;

/// Subdirectory of a Claude data directory that holds the usage logs
pub(crate) const PROJECTS_SUBDIR: &str = "projects";

/// Extension of the usage log files (newline-delimited JSON)
pub(crate) const LOG_EXTENSION: &str = "jsonl";

/// Comma-separated override for the Claude data directories
pub(crate) const CLAUDE_CONFIG_DIR_ENV: &str = "CLAUDE_CONFIG_DIR";

/// Status line timestamp format: "2025-01-15T13:45:09"
pub(crate) const LOG_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Program invoked to start a new block
pub(crate) const DEFAULT_COMMAND: &str = "claude";

/// Cheapest prompt that still counts as usage
pub(crate) const DEFAULT_COMMAND_ARGS: &[&str] = &["--dangerously-skip-permissions", "1+1"];

/// Fallback value when the model name is unavailable
pub(crate) const UNKNOWN: &str = "unknown";
