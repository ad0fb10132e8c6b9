//! Traits shared by builtins and external commands.

use crate::env::Environment;
use crate::parser::ParsedCommand;
use anyhow::Result;
use std::process::Child;

/// Outcome of launching a command unit.
///
/// Builtins complete synchronously; external commands hand back the spawned
/// child so the interpreter can launch every command on a line before
/// waiting on any of them.
pub enum Launched {
    /// The command ran to completion in-process.
    Done,
    /// A child process was spawned and must eventually be reaped.
    Child(Child),
}

/// Object-safe trait for anything the interpreter can dispatch.
///
/// Implemented by builtins via a blanket impl and by external commands.
pub trait CommandUnit {
    /// Starts the command. For a builtin this applies its effect to `env`
    /// (or the process) before returning; for an external command it only
    /// spawns the child.
    fn launch(self: Box<Self>, env: &mut Environment) -> Result<Launched>;
}

/// Factory that tries to create a command unit from a parsed command.
///
/// Returns `None` when the factory doesn't recognize the command, letting
/// the interpreter fall through to the next factory in its chain.
pub trait CommandFactory {
    /// Attempt to create a unit for the given command. Must not mutate the
    /// environment; resolution reads a snapshot of the search path.
    fn try_create(&self, env: &Environment, cmd: &ParsedCommand) -> Option<Box<dyn CommandUnit>>;
}
