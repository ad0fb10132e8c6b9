//! Builtin commands executed in-process: `cd`, `exit`, `path`.

use crate::command::{CommandFactory, CommandUnit, Launched};
use crate::env::Environment;
use crate::interpreter::Factory;
use crate::parser::ParsedCommand;
use anyhow::{Context, Result, anyhow};
use std::env;

/// Builtin commands known to the interpreter at compile time.
///
/// Builtins are parsed using the [`argh`] crate (`FromArgs`) and executed
/// directly in-process without spawning a child process. The positional
/// shape of each `FromArgs` struct encodes the builtin's argument-count
/// contract, so a wrong arity surfaces as an `argh` parse failure.
pub(crate) trait Builtin: Sized + argh::FromArgs {
    /// Canonical name of the command, e.g. "cd".
    fn name() -> &'static str;

    /// Applies the builtin's effect to the interpreter state or process.
    fn run(self, env: &mut Environment) -> Result<()>;
}

impl<T: Builtin> CommandUnit for T {
    fn launch(self: Box<Self>, env: &mut Environment) -> Result<Launched> {
        T::run(*self, env)?;
        Ok(Launched::Done)
    }
}

/// Stand-in unit for a builtin invoked with arguments `argh` rejected.
///
/// Launching it fails so the caller reports the usage error through the
/// normal channel; the builtin's effect is never applied.
struct UsageError;

impl CommandUnit for UsageError {
    fn launch(self: Box<Self>, _env: &mut Environment) -> Result<Launched> {
        Err(anyhow!("invalid builtin usage"))
    }
}

impl<T: Builtin + 'static> CommandFactory for Factory<T> {
    fn try_create(&self, _env: &Environment, cmd: &ParsedCommand) -> Option<Box<dyn CommandUnit>> {
        if cmd.name() != T::name() {
            return None;
        }
        // A redirect on a builtin parses but has no effect; builtins write
        // nothing on success and errors go through the fixed diagnostic.
        let args: Vec<&str> = cmd.argv[1..].iter().map(String::as_str).collect();
        Some(match T::from_args(&[T::name()], &args) {
            Ok(builtin) => Box::new(builtin),
            Err(_) => Box::new(UsageError),
        })
    }
}

#[derive(argh::FromArgs)]
/// Change the interpreter's working directory, inherited by every child
/// spawned afterwards.
pub(crate) struct Cd {
    #[argh(positional)]
    /// directory to switch to; exactly one is required
    pub target: String,
}

impl Builtin for Cd {
    fn name() -> &'static str {
        "cd"
    }

    fn run(self, _env: &mut Environment) -> Result<()> {
        env::set_current_dir(&self.target)
            .with_context(|| format!("cd: can't chdir to {}", self.target))
    }
}

#[derive(argh::FromArgs)]
/// Terminate the interpreter with success. Takes no arguments.
pub(crate) struct Exit {}

impl Builtin for Exit {
    fn name() -> &'static str {
        "exit"
    }

    fn run(self, env: &mut Environment) -> Result<()> {
        env.should_exit = true;
        Ok(())
    }
}

#[derive(argh::FromArgs)]
/// Replace the whole search path. With no arguments the path becomes empty
/// and no external command can be resolved until the next `path`.
pub(crate) struct Path {
    #[argh(positional, greedy)]
    /// directories to search, in priority order
    pub dirs: Vec<String>,
}

impl Builtin for Path {
    fn name() -> &'static str {
        "path"
    }

    fn run(self, env: &mut Environment) -> Result<()> {
        env.search_path = self.dirs;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use std::sync::{Mutex, MutexGuard, OnceLock};
    use std::time::{SystemTime, UNIX_EPOCH};

    fn lock_current_dir() -> MutexGuard<'static, ()> {
        static MUTEX: OnceLock<Mutex<()>> = OnceLock::new();
        MUTEX.get_or_init(|| Mutex::new(())).lock().unwrap()
    }

    fn make_unique_temp_dir() -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let p = env::temp_dir().join(format!("parsh_builtin_{}_{}", std::process::id(), nanos));
        fs::create_dir_all(&p).expect("create temp dir");
        p
    }

    fn dispatch<T: Builtin + 'static>(segment: &str, env: &mut Environment) -> Option<Result<()>> {
        let cmd = crate::parser::parse_command(segment).unwrap();
        let unit = Factory::<T>::default().try_create(env, &cmd)?;
        Some(unit.launch(env).map(|_| ()))
    }

    #[test]
    fn factory_ignores_other_names() {
        let mut env = Environment::new();
        assert!(dispatch::<Cd>("ls", &mut env).is_none());
        assert!(dispatch::<Exit>("exits", &mut env).is_none());
    }

    #[test]
    fn cd_changes_working_directory() {
        let _lock = lock_current_dir();
        let orig = env::current_dir().unwrap();
        let temp = make_unique_temp_dir();
        let canonical = fs::canonicalize(&temp).unwrap();

        let mut shell_env = Environment::new();
        let res = dispatch::<Cd>(&format!("cd {}", canonical.display()), &mut shell_env).unwrap();
        assert!(res.is_ok());
        assert_eq!(fs::canonicalize(env::current_dir().unwrap()).unwrap(), canonical);

        env::set_current_dir(orig).expect("restore cwd");
        let _ = fs::remove_dir_all(temp);
    }

    #[test]
    fn cd_with_wrong_arity_errors_and_keeps_cwd() {
        let _lock = lock_current_dir();
        let orig = env::current_dir().unwrap();
        let mut shell_env = Environment::new();

        assert!(dispatch::<Cd>("cd", &mut shell_env).unwrap().is_err());
        assert!(dispatch::<Cd>("cd /tmp /var", &mut shell_env).unwrap().is_err());
        assert_eq!(env::current_dir().unwrap(), orig);
    }

    #[test]
    fn cd_to_missing_directory_errors_and_keeps_cwd() {
        let _lock = lock_current_dir();
        let orig = env::current_dir().unwrap();
        let mut shell_env = Environment::new();

        let target = format!("cd /nonexistent_parsh_dir_{}", std::process::id());
        assert!(dispatch::<Cd>(&target, &mut shell_env).unwrap().is_err());
        assert_eq!(env::current_dir().unwrap(), orig);
    }

    #[test]
    fn exit_requests_termination() {
        let mut env = Environment::new();
        assert!(dispatch::<Exit>("exit", &mut env).unwrap().is_ok());
        assert!(env.should_exit);
    }

    #[test]
    fn exit_with_arguments_errors_without_terminating() {
        let mut env = Environment::new();
        assert!(dispatch::<Exit>("exit 1", &mut env).unwrap().is_err());
        assert!(!env.should_exit);
    }

    #[test]
    fn path_replaces_the_search_path_in_order() {
        let mut env = Environment::new();
        assert!(dispatch::<Path>("path /a /b /c", &mut env).unwrap().is_ok());
        assert_eq!(env.search_path, ["/a", "/b", "/c"]);
        assert_eq!(env.search_path_string(), "/a:/b:/c");
    }

    #[test]
    fn path_with_no_arguments_clears_the_search_path() {
        let mut env = Environment::new();
        assert!(dispatch::<Path>("path", &mut env).unwrap().is_ok());
        assert!(env.search_path.is_empty());
    }
}
