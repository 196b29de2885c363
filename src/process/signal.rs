use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use libc::{c_int, SIGINT, SIGTSTP, SIG_DFL, SIG_IGN};
use tracing::debug;

use crate::process::ProcessError;

pub const ENTER_NOTICE: &[u8] = b"Entering foreground-only mode (& is now ignored)\n";
pub const EXIT_NOTICE: &[u8] = b"Exiting foreground-only mode\n";

/// The one piece of state the SIGTSTP handler is allowed to touch.
#[derive(Debug, Clone, Default)]
pub struct ForegroundOnly(Arc<AtomicBool>);

impl ForegroundOnly {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Flips the mode and returns the notice for the new state. Performs no
    /// allocation so it is usable from a signal handler.
    pub fn toggle(&self) -> &'static [u8] {
        if self.0.fetch_xor(true, Ordering::SeqCst) {
            EXIT_NOTICE
        } else {
            ENTER_NOTICE
        }
    }
}

/// Ignores SIGINT in the shell and binds SIGTSTP to the foreground-only toggle.
pub fn setup_signal_handlers(mode: &ForegroundOnly) -> Result<(), ProcessError> {
    set_disposition(SIGINT, SIG_IGN)?;

    let mode = mode.clone();
    let action = move || {
        let notice = mode.toggle();
        unsafe {
            libc::write(
                libc::STDOUT_FILENO,
                notice.as_ptr() as *const libc::c_void,
                notice.len(),
            );
        }
    };
    // SAFETY: the action only does an atomic xor and a write(2).
    unsafe { signal_hook::low_level::register(SIGTSTP, action) }
        .map_err(|e| ProcessError::SignalError(e.to_string()))?;

    debug!("signal handlers installed");
    Ok(())
}

fn set_disposition(signo: c_int, handler: libc::sighandler_t) -> Result<(), ProcessError> {
    let previous = unsafe { libc::signal(signo, handler) };
    if previous == libc::SIG_ERR {
        return Err(ProcessError::SignalError(format!(
            "cannot set disposition for signal {}",
            signo
        )));
    }
    Ok(())
}

/// Child side of fork: foreground jobs can be interrupted, nobody but the
/// shell reacts to SIGTSTP. Only async-signal-safe calls.
pub(crate) fn reset_for_child(background: bool) {
    unsafe {
        if !background {
            libc::signal(SIGINT, SIG_DFL);
        }
        libc::signal(SIGTSTP, SIG_IGN);
    }
}
