//! Parses one command segment into an argument vector and an optional
//! output redirection.

use crate::lexer;
use std::path::PathBuf;

/// One command extracted from an input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    /// POSIX-style argument vector. The first element is the command name;
    /// the vector is never empty.
    pub argv: Vec<String>,
    /// File to which the command's standard output and standard error are
    /// redirected. `None` means the child inherits the parent's streams.
    pub redirect: Option<PathBuf>,
}

impl ParsedCommand {
    /// The executable or builtin name, i.e. `argv[0]`.
    pub fn name(&self) -> &str {
        &self.argv[0]
    }
}

/// Errors produced while parsing a command segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// More than one `>` in a single command.
    AmbiguousRedirect,
    /// The text after `>` is not exactly one token.
    MalformedRedirect,
    /// The segment contains a redirection but no command text.
    EmptyCommand,
}

/// Parses one trimmed, non-empty command segment.
///
/// The segment is split at the first `>` (a second one is an error); the
/// right side must name exactly one redirection target, and the left side
/// is whitespace-split into the argument vector.
pub fn parse_command(segment: &str) -> Result<ParsedCommand, ParseError> {
    let mut pieces = segment.split('>');
    let head = pieces.next().unwrap_or("");
    let tail: Vec<&str> = pieces.collect();
    if tail.len() > 1 {
        return Err(ParseError::AmbiguousRedirect);
    }

    let redirect = match tail.first() {
        Some(rhs) => {
            let mut targets = rhs.split_whitespace();
            match (targets.next(), targets.next()) {
                (Some(target), None) => Some(PathBuf::from(target)),
                _ => return Err(ParseError::MalformedRedirect),
            }
        }
        None => None,
    };

    let argv: Vec<String> = head.split_whitespace().map(str::to_owned).collect();
    if argv.is_empty() {
        // The tokenizer filters blank segments, so this only fires for
        // segments like "> file" where all text belongs to the redirect.
        return Err(ParseError::EmptyCommand);
    }

    Ok(ParsedCommand { argv, redirect })
}

/// Parses a whole input line into its ordered command sequence.
///
/// A single malformed segment voids the entire line: the segments share no
/// recovery point, so nothing from a partially-bad line should run.
pub fn parse_line(line: &str) -> Result<Vec<ParsedCommand>, ParseError> {
    lexer::split_commands(line)
        .into_iter()
        .map(parse_command)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(cmd: &ParsedCommand) -> Vec<&str> {
        cmd.argv.iter().map(String::as_str).collect()
    }

    #[test]
    fn plain_command_with_arguments() {
        let cmd = parse_command("ls -l /tmp").unwrap();
        assert_eq!(argv(&cmd), ["ls", "-l", "/tmp"]);
        assert_eq!(cmd.redirect, None);
        assert_eq!(cmd.name(), "ls");
    }

    #[test]
    fn redirect_is_extracted_and_kept_out_of_argv() {
        let cmd = parse_command("echo hello > out.txt").unwrap();
        assert_eq!(argv(&cmd), ["echo", "hello"]);
        assert_eq!(cmd.redirect, Some(PathBuf::from("out.txt")));
    }

    #[test]
    fn redirect_without_surrounding_spaces() {
        let cmd = parse_command("echo hi>out").unwrap();
        assert_eq!(argv(&cmd), ["echo", "hi"]);
        assert_eq!(cmd.redirect, Some(PathBuf::from("out")));
    }

    #[test]
    fn two_redirect_operators_are_ambiguous() {
        assert_eq!(
            parse_command("foo > a > b"),
            Err(ParseError::AmbiguousRedirect)
        );
    }

    #[test]
    fn redirect_needs_exactly_one_target() {
        assert_eq!(parse_command("foo >"), Err(ParseError::MalformedRedirect));
        assert_eq!(
            parse_command("foo > a b"),
            Err(ParseError::MalformedRedirect)
        );
    }

    #[test]
    fn redirect_with_no_command_is_rejected() {
        assert_eq!(parse_command("> file"), Err(ParseError::EmptyCommand));
    }

    #[test]
    fn line_splits_into_ordered_commands() {
        let cmds = parse_line("echo a & echo b > f &").unwrap();
        assert_eq!(cmds.len(), 2);
        assert_eq!(cmds[0].name(), "echo");
        assert_eq!(cmds[1].redirect, Some(PathBuf::from("f")));
    }

    #[test]
    fn one_bad_segment_voids_the_whole_line() {
        assert_eq!(
            parse_line("echo ok > f1 & foo > a > b"),
            Err(ParseError::AmbiguousRedirect)
        );
    }

    #[test]
    fn separators_only_line_parses_to_nothing() {
        assert_eq!(parse_line("&&  &").unwrap(), Vec::new());
    }
}
