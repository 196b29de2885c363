use std::path::PathBuf;

use crate::flags::Flags;

pub const DEFAULT_PROMPT: &str = ": ";
pub const MAX_LINE_LEN: usize = 2048;
pub const MAX_ARGS: usize = 512;
pub const TOKEN_CAPACITY: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    pub prompt: String,
    pub max_line_len: usize,
    pub max_args: usize,
    pub token_capacity: usize,
    pub quiet: bool,
    pub debug: bool,
    pub script: Option<PathBuf>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            max_line_len: MAX_LINE_LEN,
            max_args: MAX_ARGS,
            token_capacity: TOKEN_CAPACITY,
            quiet: false,
            debug: false,
            script: None,
        }
    }
}

impl ShellConfig {
    pub fn from_flags(flags: &Flags) -> Self {
        Self {
            quiet: flags.is_set("quiet"),
            debug: flags.is_set("debug"),
            script: flags.get_value("script").map(PathBuf::from),
            ..Self::default()
        }
    }

    /// Default `tracing` filter directive when `RUST_LOG` is not set.
    pub fn log_directive(&self) -> &'static str {
        if self.debug {
            "smallsh=debug"
        } else {
            "warn"
        }
    }
}
