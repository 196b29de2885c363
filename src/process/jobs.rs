use std::io::{self, Write};

use tracing::{debug, warn};

use super::{Pid, Status};

/// Seam between the job table and `waitpid(2)`.
pub trait ProcessWaiter {
    /// Returns `None` while the process is still running.
    fn try_wait(&self, pid: Pid) -> io::Result<Option<Status>>;
    fn wait(&self, pid: Pid) -> io::Result<Status>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemWaiter;

impl SystemWaiter {
    fn waitpid(pid: Pid, options: libc::c_int) -> io::Result<Option<Status>> {
        let mut raw: libc::c_int = 0;
        loop {
            let ret = unsafe { libc::waitpid(pid, &mut raw, options) };
            match ret {
                0 => return Ok(None),
                r if r > 0 => return Ok(Some(Status::from_wait(raw))),
                _ => {
                    let err = io::Error::last_os_error();
                    if err.kind() != io::ErrorKind::Interrupted {
                        return Err(err);
                    }
                }
            }
        }
    }
}

impl ProcessWaiter for SystemWaiter {
    fn try_wait(&self, pid: Pid) -> io::Result<Option<Status>> {
        Self::waitpid(pid, libc::WNOHANG)
    }

    fn wait(&self, pid: Pid) -> io::Result<Status> {
        Self::waitpid(pid, 0)?.ok_or_else(|| io::Error::other("waitpid returned no status"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReapMode {
    /// Per-iteration poll; never blocks.
    Poll,
    /// Shutdown: wait for every tracked job.
    Block,
}

/// Outstanding background pids, in spawn order.
#[derive(Debug)]
pub struct BackgroundJobs<W = SystemWaiter> {
    pids: Vec<Pid>,
    waiter: W,
}

impl Default for BackgroundJobs<SystemWaiter> {
    fn default() -> Self {
        Self::new(SystemWaiter)
    }
}

impl<W: ProcessWaiter> BackgroundJobs<W> {
    pub fn new(waiter: W) -> Self {
        Self {
            pids: Vec::new(),
            waiter,
        }
    }

    /// Returns false if the pid was already tracked.
    pub fn track(&mut self, pid: Pid) -> bool {
        if self.pids.contains(&pid) {
            return false;
        }
        self.pids.push(pid);
        true
    }

    pub fn pids(&self) -> &[Pid] {
        &self.pids
    }

    pub fn is_empty(&self) -> bool {
        self.pids.is_empty()
    }

    /// Collects every job that has finished, dropping it from the table
    /// while keeping the remaining pids in order.
    pub fn reap(&mut self, mode: ReapMode) -> Vec<(Pid, Status)> {
        let waiter = &self.waiter;
        let mut finished = Vec::new();

        self.pids.retain(|&pid| {
            let result = match mode {
                ReapMode::Poll => waiter.try_wait(pid),
                ReapMode::Block => waiter.wait(pid).map(Some),
            };
            match result {
                Ok(Some(status)) => {
                    debug!(pid, %status, "reaped background job");
                    finished.push((pid, status));
                    false
                }
                Ok(None) => true,
                Err(e) => {
                    // The pid is gone and will never report; stop tracking it.
                    warn!(pid, error = %e, "dropping background job");
                    false
                }
            }
        });

        finished
    }

    /// Reaps and prints one completion notice per finished job.
    pub fn report(&mut self, mode: ReapMode, out: &mut dyn Write) -> io::Result<()> {
        for (pid, status) in self.reap(mode) {
            writeln!(out, "background pid {} is done: {}", pid, status)?;
        }
        out.flush()
    }
}
