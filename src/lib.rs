//! A tiny line-oriented command interpreter with parallel launch.
//!
//! Lines read from a terminal or a batch file are split on `&` into
//! independent commands; every external command on a line is launched as a
//! child process before any of them is awaited, so `&`-separated commands
//! run concurrently. A command may redirect its combined standard output
//! and standard error to a file with `> file`, and three builtins (`cd`,
//! `exit`, `path`) run in-process against the interpreter's own state.
//!
//! The main entry point is [`Interpreter`], which owns the mutable search
//! path and drives both the interactive loop and batch execution. The
//! public modules [`parser`] and [`env`] expose the parsed-command data
//! model and the interpreter state for embedding and testing.

mod builtin;
pub mod command;
pub mod env;
mod external;
mod interpreter;
mod lexer;
pub mod parser;

pub use interpreter::Interpreter;

/// The one diagnostic this interpreter ever shows the user.
///
/// Every recognized failure — bad startup arguments, a malformed line, an
/// unresolvable command, a failed spawn, a misused builtin — is reported
/// with this exact string on standard error and nothing else.
pub const ERROR_MESSAGE: &str = "An error has occurred\n";

/// Writes [`ERROR_MESSAGE`] to standard error.
///
/// A write failure here is ignored: there is no further channel to report
/// it on, and the caller's report-and-continue contract must hold anyway.
pub fn report_error() {
    use std::io::Write;
    let _ = std::io::stderr().write_all(ERROR_MESSAGE.as_bytes());
}
