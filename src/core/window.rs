//! 5-hour block evaluation

use chrono::{DateTime, TimeDelta, Utc};

/// State of the current billing block relative to the latest activity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BlockState {
    Active { elapsed: TimeDelta },
    Expired { elapsed: TimeDelta },
}

impl BlockState {
    pub(crate) fn elapsed(self) -> TimeDelta {
        match self {
            BlockState::Active { elapsed } | BlockState::Expired { elapsed } => elapsed,
        }
    }

    pub(crate) fn is_active(self) -> bool {
        matches!(self, BlockState::Active { .. })
    }
}

/// Active while strictly less than `window` has passed since `latest`
pub(crate) fn evaluate(now: DateTime<Utc>, latest: DateTime<Utc>, window: TimeDelta) -> BlockState {
    let elapsed = now - latest;
    if elapsed < window {
        BlockState::Active { elapsed }
    } else {
        BlockState::Expired { elapsed }
    }
}

/// Elapsed time floored to whole minutes as `HH:MM`.
///
/// Negative durations (clock skew, future timestamps) render as `00:00`.
pub(crate) fn format_elapsed(elapsed: TimeDelta) -> String {
    let total_minutes = elapsed.num_minutes().max(0);
    format!("{:02}:{:02}", total_minutes / 60, total_minutes % 60)
}
