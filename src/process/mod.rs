use std::fmt;
use std::io;

pub mod executor;
pub mod jobs;
pub mod redirect;
pub mod signal;
pub mod status;

pub use executor::ProcessExecutor;
pub use jobs::{BackgroundJobs, ProcessWaiter, ReapMode, SystemWaiter};
pub use signal::ForegroundOnly;
pub use status::Status;

pub type Pid = libc::pid_t;

#[derive(Debug)]
pub enum ProcessError {
    Fork(io::Error),
    Wait(io::Error),
    InvalidArgument(String),
    SignalError(String),
}

impl ProcessError {
    /// A failed fork or signal setup leaves the shell unable to run anything.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ProcessError::Fork(_) | ProcessError::SignalError(_))
    }
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessError::Fork(e) => write!(f, "fork failed: {}", e),
            ProcessError::Wait(e) => write!(f, "wait failed: {}", e),
            ProcessError::InvalidArgument(arg) => write!(f, "invalid argument: {:?}", arg),
            ProcessError::SignalError(msg) => write!(f, "Signal error: {}", msg),
        }
    }
}

impl std::error::Error for ProcessError {}
