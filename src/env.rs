//! Process-wide interpreter state.

/// Mutable state shared by every command the interpreter dispatches.
///
/// The working directory is deliberately not mirrored here: `cd` changes
/// the real process working directory so that every subsequently spawned
/// child inherits it.
#[derive(Debug, Clone)]
pub struct Environment {
    /// Ordered directories searched to resolve a bare command name.
    /// Replaced wholesale by the `path` builtin; an empty list means no
    /// external command can be resolved.
    pub search_path: Vec<String>,
    /// Set by the `exit` builtin; stops line dispatch and the input loop.
    pub should_exit: bool,
}

impl Environment {
    /// Interpreter state with the default single-directory search path.
    pub fn new() -> Self {
        Self {
            search_path: vec![String::from("/bin")],
            should_exit: false,
        }
    }

    /// The colon-joined external representation of the search path.
    pub fn search_path_string(&self) -> String {
        self.search_path.join(":")
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
