use std::io::Write;

use tracing::debug;

use crate::core::commands::Flow;
use crate::error::ShellError;
use crate::parse::CommandLine;

pub(crate) trait CommandHandler {
    fn execute_command(&mut self, line: &str) -> Result<Flow, ShellError>;
}

impl<R: std::io::BufRead, W: Write> CommandHandler for super::Shell<R, W> {
    fn execute_command(&mut self, line: &str) -> Result<Flow, ShellError> {
        let command = self.parser.parse(line)?;
        if command.is_empty() {
            return Ok(Flow::Continue);
        }

        // Builtins ignore redirections and `&`.
        if let Some(result) =
            self.builtins
                .execute(&command.args, &mut self.state, &mut self.output)
        {
            return Ok(result?);
        }

        self.spawn_external(&command)?;
        Ok(Flow::Continue)
    }
}

impl<R: std::io::BufRead, W: Write> super::Shell<R, W> {
    fn spawn_external(&mut self, command: &CommandLine) -> Result<(), ShellError> {
        let background = self.state.runs_in_background(command.background);
        if command.background && !background {
            debug!("foreground-only mode: running requested background job in foreground");
        }

        self.output.flush()?;
        if background {
            let pid = self.executor.spawn_process(command, true)?;
            self.jobs.track(pid);
            writeln!(self.output, "background pid is {}", pid)?;
            self.output.flush()?;
        } else {
            let status = self.executor.run(command)?;
            self.state.set_status(status);
        }
        Ok(())
    }
}
