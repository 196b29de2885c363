use std::fmt;

/// How a process ended. Exactly one of the two forms applies to any wait status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Exited(i32),
    Signaled(i32),
}

impl Status {
    pub const SUCCESS: Status = Status::Exited(0);
    /// Recorded when a builtin fails.
    pub const FAILURE: Status = Status::Exited(1);

    /// Decodes a raw `waitpid` status word.
    pub fn from_wait(raw: libc::c_int) -> Self {
        if libc::WIFSIGNALED(raw) {
            Status::Signaled(libc::WTERMSIG(raw))
        } else {
            Status::Exited(libc::WEXITSTATUS(raw))
        }
    }
}

impl Default for Status {
    fn default() -> Self {
        Status::SUCCESS
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Exited(code) => write!(f, "exit value {}", code),
            Status::Signaled(signo) => write!(f, "terminated by signal {}", signo),
        }
    }
}
