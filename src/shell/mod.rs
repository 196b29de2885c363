use std::io::{BufRead, Write};

use tracing::debug;

mod executor;

use crate::{
    core::{commands::Builtins, ShellConfig, ShellState},
    error::ShellError,
    highlight::SyntaxHighlighter,
    parse::{CommandBuilder, PidExpander},
    process::{signal, BackgroundJobs, ProcessExecutor, ReapMode},
};

use executor::CommandHandler;
pub use crate::core::commands::Flow;

/// The prompt/read/dispatch/reap loop over any line source and sink.
pub struct Shell<R, W> {
    pub(crate) input: R,
    pub(crate) output: W,
    pub(crate) config: ShellConfig,
    pub(crate) state: ShellState,
    pub(crate) parser: CommandBuilder,
    pub(crate) builtins: Builtins,
    pub(crate) executor: ProcessExecutor,
    pub(crate) jobs: BackgroundJobs,
    pub(crate) highlighter: SyntaxHighlighter,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(config: ShellConfig, input: R, output: W) -> Self {
        let state = ShellState::new();
        let parser = CommandBuilder::new(
            PidExpander::new(state.pid(), config.token_capacity),
            config.max_line_len,
            config.max_args,
        );

        Shell {
            input,
            output,
            config,
            state,
            parser,
            builtins: Builtins::new(),
            executor: ProcessExecutor::new(),
            jobs: BackgroundJobs::default(),
            highlighter: SyntaxHighlighter::new(),
        }
    }

    /// Ignore SIGINT and hook SIGTSTP up to foreground-only mode.
    pub fn install_signal_handlers(&self) -> Result<(), ShellError> {
        signal::setup_signal_handlers(self.state.foreground_only())?;
        Ok(())
    }

    /// Runs until `exit` or end of input. Returns early only on a fatal error.
    pub fn run(&mut self) -> Result<(), ShellError> {
        let mut line = Vec::new();
        loop {
            // Completion notices always come before the next prompt.
            self.jobs.report(ReapMode::Poll, &mut self.output)?;
            self.prompt()?;

            line.clear();
            if self.input.read_until(b'\n', &mut line)? == 0 {
                debug!("end of input");
                break;
            }

            match self.execute_command(&String::from_utf8_lossy(&line)) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => break,
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => self.report_error(&e),
            }
        }
        self.shutdown()
    }

    /// Waits out every background job before the shell goes away.
    pub fn shutdown(&mut self) -> Result<(), ShellError> {
        if !self.jobs.is_empty() {
            debug!(jobs = self.jobs.pids().len(), "waiting for background jobs");
        }
        self.jobs.report(ReapMode::Block, &mut self.output)?;
        Ok(())
    }

    fn prompt(&mut self) -> Result<(), ShellError> {
        if !self.config.quiet {
            write!(self.output, "{}", self.config.prompt)?;
        }
        self.output.flush()?;
        Ok(())
    }

    pub(crate) fn report_error(&self, error: &ShellError) {
        eprintln!(
            "{}",
            self.highlighter
                .highlight_error(&format!("smallsh: {}", error))
        );
    }
}
