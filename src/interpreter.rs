//! The interpreter: factory chain, per-line orchestration, input loops.

use crate::command::{CommandFactory, Launched};
use crate::env::Environment;
use crate::parser;
use crate::report_error;
use anyhow::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::io::BufRead;

const PROMPT: &str = "parsh> ";

/// Factory allows creating instances of CommandUnit.
///
/// Only supports commands defined in this crate — the builtins and
/// ExternalCommand.
pub(crate) struct Factory<T> {
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Default for Factory<T> {
    fn default() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

/// A line-oriented interpreter executing builtins in-process and external
/// commands as concurrently-launched children.
///
/// The interpreter owns an [`Environment`] (search path, exit flag) and a
/// chain of [`CommandFactory`] objects queried in order for each parsed
/// command; builtin factories come before the external one, so a builtin
/// name is never looked up on the search path. See [`Default`] for the
/// stock chain.
pub struct Interpreter {
    env: Environment,
    factories: Vec<Box<dyn CommandFactory>>,
}

impl Interpreter {
    /// Create an interpreter with a custom factory chain.
    pub fn new(factories: Vec<Box<dyn CommandFactory>>) -> Self {
        Self {
            env: Environment::new(),
            factories,
        }
    }

    /// Whether the `exit` builtin has requested termination.
    pub fn should_exit(&self) -> bool {
        self.env.should_exit
    }

    /// Executes one input line.
    ///
    /// The line is parsed into its `&`-separated commands; a parse error
    /// abandons the whole line. Builtins run synchronously as encountered,
    /// every external command is spawned before any child is awaited, and
    /// only once the full sequence has been dispatched does the interpreter
    /// wait for the collected children (in no particular reaping order).
    /// Per-command failures (unresolvable name, failed spawn, builtin
    /// misuse) are reported and do not stop the rest of the line.
    pub fn run_line(&mut self, line: &str) {
        let commands = match parser::parse_line(line) {
            Ok(commands) => commands,
            Err(_) => {
                report_error();
                return;
            }
        };

        let mut children = Vec::new();
        for cmd in &commands {
            if self.env.should_exit {
                break;
            }
            let unit = self
                .factories
                .iter()
                .find_map(|factory| factory.try_create(&self.env, cmd));
            match unit {
                Some(unit) => match unit.launch(&mut self.env) {
                    Ok(Launched::Done) => {}
                    Ok(Launched::Child(child)) => children.push(child),
                    Err(_) => report_error(),
                },
                // No factory recognized the name: not found on the search
                // path. Siblings on the line are still attempted.
                None => report_error(),
            }
        }

        if self.env.should_exit {
            // `exit` terminates the interpreter without awaiting children
            // that were already launched on this line.
            return;
        }
        for mut child in children {
            let _ = child.wait();
        }
    }

    /// Interactive loop: prompt, read, execute, until EOF or `exit`.
    pub fn repl(&mut self) -> Result<()> {
        let mut editor = DefaultEditor::new()?;
        while !self.env.should_exit {
            match editor.readline(PROMPT) {
                Ok(line) => {
                    let _ = editor.add_history_entry(line.as_str());
                    self.run_line(&line);
                }
                // ^C discards the pending line and prompts again.
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => break,
                Err(err) => return Err(err.into()),
            }
        }
        Ok(())
    }

    /// Batch loop: execute every line of `input` until EOF or `exit`.
    /// A read failure is an error; the caller decides the exit status.
    pub fn run_batch<R: BufRead>(&mut self, input: R) -> Result<()> {
        for line in input.lines() {
            let line = line?;
            self.run_line(&line);
            if self.env.should_exit {
                break;
            }
        }
        Ok(())
    }
}

impl Default for Interpreter {
    /// Create an interpreter with the stock factory chain:
    /// builtins `cd`, `exit`, `path`, then the external-command launcher.
    fn default() -> Self {
        use crate::builtin::{Cd, Exit, Path};
        use crate::external::ExternalCommand;
        Self::new(vec![
            Box::new(Factory::<Cd>::default()),
            Box::new(Factory::<Exit>::default()),
            Box::new(Factory::<Path>::default()),
            Box::new(Factory::<ExternalCommand>::default()),
        ])
    }
}
