use super::{Command, CommandError, Flow};
use crate::core::state::ShellState;
use crate::process::Status;
use std::env;
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;

#[derive(Clone)]
pub struct CdCommand;

impl Default for CdCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl CdCommand {
    pub fn new() -> Self {
        Self
    }

    /// `$HOME`, falling back to the platform's notion of a home directory.
    fn home_dir() -> Result<PathBuf, CommandError> {
        env::var_os("HOME")
            .filter(|home| !home.is_empty())
            .map(PathBuf::from)
            .or_else(dirs::home_dir)
            .ok_or(CommandError::HomeDirNotFound)
    }
}

impl Command for CdCommand {
    fn execute(
        &self,
        args: &[String],
        state: &mut ShellState,
        _out: &mut dyn Write,
    ) -> Result<Flow, CommandError> {
        let target = match args.first() {
            Some(path) => PathBuf::from(path),
            None => Self::home_dir()?,
        };

        env::set_current_dir(&target).map_err(|source| CommandError::Cd {
            path: target.clone(),
            source,
        })?;
        debug!(dir = %target.display(), "changed directory");

        state.set_status(Status::SUCCESS);
        Ok(Flow::Continue)
    }
}
