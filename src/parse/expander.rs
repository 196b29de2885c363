use std::borrow::Cow;

use super::ParseError;

pub const PID_MARKER: &str = "$$";

/// Rewrites every `$$` in a word into the shell's own pid.
#[derive(Debug, Clone)]
pub struct PidExpander {
    pid: String,
    capacity: usize,
}

impl PidExpander {
    pub fn new(pid: libc::pid_t, capacity: usize) -> Self {
        Self {
            pid: pid.to_string(),
            capacity,
        }
    }

    /// Markers are matched left to right without overlap, so `$$$` becomes
    /// the pid followed by a lone `$`.
    pub fn expand<'a>(&self, token: &'a str) -> Result<Cow<'a, str>, ParseError> {
        if !token.contains(PID_MARKER) {
            return Ok(Cow::Borrowed(token));
        }

        let expanded = token.replace(PID_MARKER, &self.pid);
        if expanded.len() > self.capacity {
            return Err(ParseError::ExpansionOverflow {
                token: token.to_string(),
                capacity: self.capacity,
            });
        }
        Ok(Cow::Owned(expanded))
    }
}
