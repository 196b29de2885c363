use crate::process::{ForegroundOnly, Pid, Status};

/// Per-shell state threaded through the main loop.
#[derive(Debug, Clone)]
pub struct ShellState {
    pid: Pid,
    last_status: Status,
    foreground_only: ForegroundOnly,
}

impl ShellState {
    pub fn new() -> Self {
        Self::with_pid(std::process::id() as Pid)
    }

    pub fn with_pid(pid: Pid) -> Self {
        Self {
            pid,
            last_status: Status::default(),
            foreground_only: ForegroundOnly::new(),
        }
    }

    pub fn pid(&self) -> Pid {
        self.pid
    }

    pub fn last_status(&self) -> Status {
        self.last_status
    }

    pub fn set_status(&mut self, status: Status) {
        self.last_status = status;
    }

    pub fn foreground_only(&self) -> &ForegroundOnly {
        &self.foreground_only
    }

    /// A requested `&` only counts while foreground-only mode is off.
    pub fn runs_in_background(&self, requested: bool) -> bool {
        requested && !self.foreground_only.is_active()
    }
}

impl Default for ShellState {
    fn default() -> Self {
        Self::new()
    }
}
