use tracing::debug;

use super::{tokenize, ParseError, PidExpander};

/// One parsed input line: `command [arg...] [< in] [> out] [&]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandLine {
    pub args: Vec<String>,
    pub input: Option<String>,
    pub output: Option<String>,
    pub background: bool,
}

impl CommandLine {
    pub fn program(&self) -> Option<&str> {
        self.args.first().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct CommandBuilder {
    expander: PidExpander,
    max_line_len: usize,
    max_args: usize,
}

impl CommandBuilder {
    pub fn new(expander: PidExpander, max_line_len: usize, max_args: usize) -> Self {
        Self {
            expander,
            max_line_len,
            max_args,
        }
    }

    pub fn parse(&self, line: &str) -> Result<CommandLine, ParseError> {
        let line = line.trim_end_matches(['\n', '\r']);
        let len = line.chars().count();
        if len > self.max_line_len {
            return Err(ParseError::LineTooLong {
                len,
                max: self.max_line_len,
            });
        }

        let mut command = CommandLine::default();
        let mut surplus = 0;
        let mut words = tokenize(line);

        while let Some(word) = words.next() {
            match word {
                "<" if command.input.is_none() => {
                    // A trailing `<` has nothing to consume and is dropped.
                    if let Some(path) = words.next() {
                        command.input = Some(self.expander.expand(path)?.into_owned());
                    }
                }
                ">" if command.output.is_none() => {
                    if let Some(path) = words.next() {
                        command.output = Some(self.expander.expand(path)?.into_owned());
                    }
                }
                // Any standalone `&` requests the background, not only a trailing one.
                "&" => command.background = true,
                // Keep classifying past the limit so the error counts arguments only.
                _ if command.args.len() == self.max_args => surplus += 1,
                _ => command.args.push(self.expander.expand(word)?.into_owned()),
            }
        }

        if surplus > 0 {
            return Err(ParseError::TooManyArgs {
                count: self.max_args + surplus,
                max: self.max_args,
            });
        }

        debug!(?command, "parsed line");
        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> CommandBuilder {
        CommandBuilder::new(PidExpander::new(4567, 256), 2048, 512)
    }

    fn args(words: &[&str]) -> Vec<String> {
        words.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_full_grammar() {
        let cmd = builder()
            .parse("wc -l < input.txt > output.txt &\n")
            .unwrap();
        assert_eq!(cmd.args, args(&["wc", "-l"]));
        assert_eq!(cmd.input.as_deref(), Some("input.txt"));
        assert_eq!(cmd.output.as_deref(), Some("output.txt"));
        assert!(cmd.background);
    }

    #[test]
    fn test_output_before_input() {
        let cmd = builder().parse("sort > out < in").unwrap();
        assert_eq!(cmd.args, args(&["sort"]));
        assert_eq!(cmd.input.as_deref(), Some("in"));
        assert_eq!(cmd.output.as_deref(), Some("out"));
        assert!(!cmd.background);
    }

    #[test]
    fn test_paths_are_expanded() {
        let cmd = builder().parse("cat < in$$ > out.$$").unwrap();
        assert_eq!(cmd.input.as_deref(), Some("in4567"));
        assert_eq!(cmd.output.as_deref(), Some("out.4567"));
    }

    #[test]
    fn test_args_are_expanded() {
        let cmd = builder().parse("echo pid$$$$log").unwrap();
        assert_eq!(cmd.args, args(&["echo", "pid45674567log"]));
    }

    #[test]
    fn test_ampersand_anywhere_sets_background() {
        let cmd = builder().parse("sleep & 5").unwrap();
        assert_eq!(cmd.args, args(&["sleep", "5"]));
        assert!(cmd.background);
    }

    #[test]
    fn test_glued_ampersand_is_an_argument() {
        let cmd = builder().parse("echo a&b").unwrap();
        assert_eq!(cmd.args, args(&["echo", "a&b"]));
        assert!(!cmd.background);
    }

    #[test]
    fn test_second_redirect_is_an_argument() {
        let cmd = builder().parse("cat < a < b > c > d").unwrap();
        assert_eq!(cmd.args, args(&["cat", "<", "b", ">", "d"]));
        assert_eq!(cmd.input.as_deref(), Some("a"));
        assert_eq!(cmd.output.as_deref(), Some("c"));
    }

    #[yare::parameterized(
        trailing_input  = { "cat <" },
        trailing_output = { "ls >" },
        both_trailing   = { "ls > out <" },
    )]
    fn dangling_redirect_does_not_crash(line: &str) {
        let cmd = builder().parse(line).unwrap();
        assert_eq!(cmd.args.len(), 1);
    }

    #[test]
    fn test_redirect_consumes_special_word() {
        let cmd = builder().parse("cat < &").unwrap();
        assert_eq!(cmd.input.as_deref(), Some("&"));
        assert!(!cmd.background);
    }

    #[yare::parameterized(
        blank          = { "" },
        comment        = { "# echo hi &" },
        only_ampersand = { "&" },
        only_redirect  = { "< in > out" },
    )]
    fn no_program(line: &str) {
        let cmd = builder().parse(line).unwrap();
        assert!(cmd.is_empty());
        assert_eq!(cmd.program(), None);
    }

    #[test]
    fn test_line_length_limit() {
        let line = format!("echo {}", "x".repeat(2048));
        assert!(matches!(
            builder().parse(&line),
            Err(ParseError::LineTooLong { max: 2048, .. })
        ));

        let line = format!("echo {}", "x".repeat(2043));
        assert!(builder().parse(&line).is_ok());
    }

    #[test]
    fn test_argument_limit() {
        let small = CommandBuilder::new(PidExpander::new(1, 256), 2048, 3);
        assert!(small.parse("a b c").is_ok());
        assert_eq!(
            small.parse("a b c d e"),
            Err(ParseError::TooManyArgs { count: 5, max: 3 })
        );
        // Redirections and `&` do not count as arguments.
        assert!(small.parse("a b c < in > out &").is_ok());
    }

    #[test]
    fn test_argument_count_skips_redirects_and_ampersand() {
        let small = CommandBuilder::new(PidExpander::new(1, 256), 2048, 2);
        assert_eq!(
            small.parse("a b c < in > out &"),
            Err(ParseError::TooManyArgs { count: 3, max: 2 })
        );
    }

    #[test]
    fn test_overflowing_expansion_is_fatal() {
        let line = format!("echo {}", "$$".repeat(80));
        let err = builder().parse(&line).unwrap_err();
        assert!(err.is_fatal());
    }
}
