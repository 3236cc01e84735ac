//! Core module - shared types and the block window logic

mod types;
mod window;

pub(crate) use types::LatestActivity;
pub(crate) use window::{evaluate, format_elapsed};
