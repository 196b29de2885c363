use std::ffi::CString;
use std::io::{self, Write};

use libc::c_char;
use tracing::{debug, warn};

use super::redirect::{to_cstring, Redirections};
use super::{signal, Pid, ProcessError, ProcessWaiter, Status, SystemWaiter};
use crate::parse::CommandLine;

/// Everything the forked child needs, allocated up front: after fork the
/// child may only make async-signal-safe calls.
struct ChildPlan {
    argv: Vec<CString>,
    redirections: Redirections,
    background: bool,
    exec_error: Vec<u8>,
}

impl ChildPlan {
    fn new(command: &CommandLine, background: bool) -> Result<Self, ProcessError> {
        let argv = command
            .args
            .iter()
            .map(|arg| to_cstring(arg))
            .collect::<Result<Vec<_>, _>>()?;
        let program = command.program().unwrap_or_default();

        Ok(Self {
            argv,
            redirections: Redirections::plan(command, background)?,
            background,
            exec_error: format!("{}: command not found or cannot be executed\n", program)
                .into_bytes(),
        })
    }

    fn exec(&self, argv: &[*const c_char]) -> ! {
        signal::reset_for_child(self.background);
        if let Err(message) = self.redirections.apply() {
            child_fail(message);
        }
        unsafe { libc::execvp(self.argv[0].as_ptr(), argv.as_ptr()) };
        child_fail(&self.exec_error)
    }
}

fn child_fail(message: &[u8]) -> ! {
    unsafe {
        libc::write(
            libc::STDERR_FILENO,
            message.as_ptr() as *const libc::c_void,
            message.len(),
        );
        libc::_exit(1)
    }
}

/// Forks and execs external programs and waits on foreground children.
#[derive(Clone, Default)]
pub struct ProcessExecutor {
    waiter: SystemWaiter,
}

impl ProcessExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts `command` in a new process. Failures after the fork (bad
    /// redirect target, unknown program) only kill the child, which exits 1.
    pub fn spawn_process(&self, command: &CommandLine, background: bool) -> Result<Pid, ProcessError> {
        if command.is_empty() {
            return Err(ProcessError::InvalidArgument(String::new()));
        }
        let plan = ChildPlan::new(command, background)?;
        let argv: Vec<*const c_char> = plan
            .argv
            .iter()
            .map(|arg| arg.as_ptr())
            .chain(std::iter::once(std::ptr::null()))
            .collect();

        // Unflushed output would otherwise be written twice.
        if let Err(e) = io::stdout().flush() {
            warn!(error = %e, "cannot flush stdout before fork");
        }
        if let Err(e) = io::stderr().flush() {
            warn!(error = %e, "cannot flush stderr before fork");
        }

        match unsafe { libc::fork() } {
            -1 => Err(ProcessError::Fork(io::Error::last_os_error())),
            0 => plan.exec(&argv),
            pid => {
                debug!(pid, args = ?command.args, background, "spawned process");
                Ok(pid)
            }
        }
    }

    /// Blocks until `pid` terminates.
    pub fn wait(&self, pid: Pid) -> Result<Status, ProcessError> {
        let status = self.waiter.wait(pid).map_err(ProcessError::Wait)?;
        debug!(pid, %status, "foreground process finished");
        Ok(status)
    }

    /// Foreground path: spawn, then wait.
    pub fn run(&self, command: &CommandLine) -> Result<Status, ProcessError> {
        let pid = self.spawn_process(command, false)?;
        self.wait(pid)
    }
}
