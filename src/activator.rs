//! Starting a new block by running the Claude CLI once

use std::io::Write;
use std::process::{Command, Stdio};

use crate::consts::{DEFAULT_COMMAND, DEFAULT_COMMAND_ARGS};
use crate::error::{ActivationError, AppError};
use crate::output::StatusLog;

/// External command run to start a new block
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ActivationCommand {
    pub(crate) program: String,
    pub(crate) args: Vec<String>,
}

impl Default for ActivationCommand {
    fn default() -> Self {
        Self {
            program: DEFAULT_COMMAND.to_string(),
            args: DEFAULT_COMMAND_ARGS.iter().map(|a| a.to_string()).collect(),
        }
    }
}

pub(crate) trait Activator {
    fn activate(&mut self) -> Result<(), ActivationError>;
}

/// Runs the command synchronously, waiting with no timeout
pub(crate) struct CommandActivator {
    command: ActivationCommand,
}

impl CommandActivator {
    pub(crate) fn new(command: ActivationCommand) -> Self {
        Self { command }
    }
}

impl Activator for CommandActivator {
    fn activate(&mut self) -> Result<(), ActivationError> {
        let program = &self.command.program;
        tracing::debug!("Running {} {:?}", program, self.command.args);

        let output = Command::new(program)
            .args(&self.command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ActivationError::NotFound {
                        program: program.clone(),
                    }
                } else {
                    ActivationError::Spawn {
                        program: program.clone(),
                        source: e,
                    }
                }
            })?;

        if output.status.success() {
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(ActivationError::Failed {
                status: output.status,
                stderr: stderr.trim().to_string(),
            })
        }
    }
}

/// Best effort: a failed activation is logged and reported as `false`,
/// never as an error. Only status output failures propagate.
pub(crate) fn activate_new_block<W: Write>(
    activator: &mut dyn Activator,
    log: &mut StatusLog<W>,
) -> Result<bool, AppError> {
    log.line("🔄 Activating new block...")?;

    match activator.activate() {
        Ok(()) => {
            log.line("✅ New block activated")?;
            Ok(true)
        }
        Err(e) => {
            log.line(format_args!("❌ Activation failed: {e}"))?;
            Ok(false)
        }
    }
}
