use std::ffi::CString;

use libc::{c_int, STDIN_FILENO, STDOUT_FILENO};

use super::ProcessError;
use crate::parse::CommandLine;

const NULL_DEVICE: &str = "/dev/null";
const OUTPUT_MODE: libc::c_uint = 0o644;

/// One descriptor rebinding, fully prepared before fork so the child only
/// has to make raw syscalls.
#[derive(Debug)]
pub struct Redirect {
    path: CString,
    flags: c_int,
    target: c_int,
    open_error: Vec<u8>,
    dup_error: Vec<u8>,
}

impl Redirect {
    fn input(path: &str) -> Result<Self, ProcessError> {
        Ok(Self {
            path: to_cstring(path)?,
            flags: libc::O_RDONLY,
            target: STDIN_FILENO,
            open_error: format!("cannot open {} for input\n", path).into_bytes(),
            dup_error: format!("cannot redirect stdin to {}\n", path).into_bytes(),
        })
    }

    fn output(path: &str) -> Result<Self, ProcessError> {
        Ok(Self {
            path: to_cstring(path)?,
            flags: libc::O_WRONLY | libc::O_CREAT | libc::O_TRUNC,
            target: STDOUT_FILENO,
            open_error: format!("cannot open {} for output\n", path).into_bytes(),
            dup_error: format!("cannot redirect stdout to {}\n", path).into_bytes(),
        })
    }

    /// Opens the file and duplicates it onto the standard slot. The opened
    /// descriptor itself is marked close-on-exec; the duplicate survives exec.
    ///
    /// Runs in the forked child: no allocation, no locks.
    fn apply(&self) -> Result<(), &[u8]> {
        let fd = unsafe { libc::open(self.path.as_ptr(), self.flags, OUTPUT_MODE) };
        if fd < 0 {
            return Err(&self.open_error);
        }
        if fd != self.target {
            if unsafe { libc::dup2(fd, self.target) } < 0 {
                return Err(&self.dup_error);
            }
            unsafe { libc::fcntl(fd, libc::F_SETFD, libc::FD_CLOEXEC) };
        }
        Ok(())
    }
}

/// The rebinding steps for one spawned command, stdin first.
#[derive(Debug, Default)]
pub struct Redirections {
    steps: Vec<Redirect>,
}

impl Redirections {
    /// Background jobs without an explicit input read from the null device
    /// so they never compete for the terminal.
    pub fn plan(command: &CommandLine, background: bool) -> Result<Self, ProcessError> {
        let mut steps = Vec::with_capacity(2);
        match command.input.as_deref() {
            Some(path) => steps.push(Redirect::input(path)?),
            None if background => steps.push(Redirect::input(NULL_DEVICE)?),
            None => {}
        }
        if let Some(path) = command.output.as_deref() {
            steps.push(Redirect::output(path)?);
        }
        Ok(Self { steps })
    }

    /// On failure, returns the message the child should report before exiting.
    pub(crate) fn apply(&self) -> Result<(), &[u8]> {
        self.steps.iter().try_for_each(Redirect::apply)
    }
}

pub(crate) fn to_cstring(value: &str) -> Result<CString, ProcessError> {
    CString::new(value).map_err(|_| ProcessError::InvalidArgument(value.to_string()))
}
