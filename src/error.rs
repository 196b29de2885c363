use crate::core::commands::CommandError;
use crate::parse::ParseError;
use crate::process::ProcessError;

#[derive(Debug)]
pub enum ShellError {
    Io(std::io::Error),
    ParseError(ParseError),
    ProcessError(ProcessError),
    CommandError(CommandError),
    FlagError(String),
}

impl ShellError {
    /// Fatal errors end the shell; everything else is reported and the
    /// loop goes on to the next prompt.
    pub fn is_fatal(&self) -> bool {
        match self {
            ShellError::ParseError(e) => e.is_fatal(),
            ShellError::ProcessError(e) => e.is_fatal(),
            ShellError::Io(_) | ShellError::CommandError(_) | ShellError::FlagError(_) => false,
        }
    }
}

impl From<std::io::Error> for ShellError {
    fn from(err: std::io::Error) -> Self {
        ShellError::Io(err)
    }
}

impl From<ParseError> for ShellError {
    fn from(err: ParseError) -> Self {
        ShellError::ParseError(err)
    }
}

impl From<ProcessError> for ShellError {
    fn from(err: ProcessError) -> Self {
        ShellError::ProcessError(err)
    }
}

impl From<CommandError> for ShellError {
    fn from(err: CommandError) -> Self {
        ShellError::CommandError(err)
    }
}

impl std::fmt::Display for ShellError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShellError::Io(e) => write!(f, "IO error: {}", e),
            ShellError::ParseError(e) => write!(f, "{}", e),
            ShellError::ProcessError(e) => write!(f, "{}", e),
            ShellError::CommandError(e) => write!(f, "{}", e),
            ShellError::FlagError(msg) => write!(f, "Flag error: {}", msg),
        }
    }
}

impl std::error::Error for ShellError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_severity() {
        let overflow = ParseError::ExpansionOverflow {
            token: "$$".to_string(),
            capacity: 256,
        };
        assert!(ShellError::from(overflow).is_fatal());

        let fork = ProcessError::Fork(io::Error::from_raw_os_error(libc::EAGAIN));
        assert!(ShellError::from(fork).is_fatal());

        let long = ParseError::LineTooLong { len: 3000, max: 2048 };
        assert!(!ShellError::from(long).is_fatal());

        let cd = CommandError::Cd {
            path: "/nope".into(),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        assert!(!ShellError::from(cd).is_fatal());
    }

    #[test]
    fn test_display_is_not_empty() {
        let errors = vec![
            ShellError::FlagError("bad".to_string()),
            ShellError::Io(io::Error::new(io::ErrorKind::Other, "io error")),
            ShellError::CommandError(CommandError::HomeDirNotFound),
        ];
        for error in errors {
            assert!(!error.to_string().is_empty());
        }
    }
}
