//! Interrupt handling for in-flight containers.
//!
//! Killing docbuild with Ctrl-C would otherwise leave the container
//! running detached. A process-wide handler is installed once; an
//! [`InterruptGuard`] arms it with the tool and name of the container
//! currently running, and disarms it again when the run completes.

use std::process::Command;
use std::sync::{Mutex, OnceLock};

use anyhow::{Context, Result};

use crate::container::tool::ContainerTool;

static ACTIVE: OnceLock<Mutex<Option<(ContainerTool, String)>>> = OnceLock::new();
static HANDLER_INSTALLED: OnceLock<()> = OnceLock::new();

fn active() -> &'static Mutex<Option<(ContainerTool, String)>> {
    ACTIVE.get_or_init(|| Mutex::new(None))
}

fn install_handler() -> Result<()> {
    if HANDLER_INSTALLED.get().is_some() {
        return Ok(());
    }

    ctrlc::set_handler(|| {
        let target = active().lock().ok().and_then(|slot| slot.clone());
        if let Some((tool, name)) = target {
            tracing::debug!(container = %name, "killing container on interrupt");
            let _ = Command::new(tool.name()).args(["kill", &name]).status();
        }
        std::process::exit(1);
    })
    .context("failed to install interrupt handler")?;

    let _ = HANDLER_INSTALLED.set(());
    Ok(())
}

/// Guard that kills the named container if the user interrupts while it
/// is running. Dropping the guard disarms the handler.
#[derive(Debug)]
pub struct InterruptGuard;

impl InterruptGuard {
    /// Arm the interrupt handler for one container run.
    pub fn arm(tool: ContainerTool, name: &str) -> Result<Self> {
        install_handler()?;
        if let Ok(mut slot) = active().lock() {
            *slot = Some((tool, name.to_string()));
        }
        Ok(InterruptGuard)
    }
}

impl Drop for InterruptGuard {
    fn drop(&mut self) {
        if let Ok(mut slot) = active().lock() {
            *slot = None;
        }
    }
}
