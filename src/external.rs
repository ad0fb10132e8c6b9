//! Resolution and launch of external commands.

use crate::command::{CommandFactory, CommandUnit, Launched};
use crate::env::Environment;
use crate::interpreter::Factory;
use crate::parser::ParsedCommand;
use anyhow::{Context, Result};
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// A command resolved through the search path, ready to spawn.
pub struct ExternalCommand {
    executable: PathBuf,
    argv: Vec<String>,
    redirect: Option<PathBuf>,
}

impl CommandFactory for Factory<ExternalCommand> {
    fn try_create(&self, env: &Environment, cmd: &ParsedCommand) -> Option<Box<dyn CommandUnit>> {
        let executable = find_in_search_path(cmd.name(), &env.search_path)?;
        Some(Box::new(ExternalCommand {
            executable,
            argv: cmd.argv.clone(),
            redirect: cmd.redirect.clone(),
        }))
    }
}

impl CommandUnit for ExternalCommand {
    /// Spawns the child and hands it back unawaited, so the interpreter can
    /// launch every command on a line before reaping any of them.
    fn launch(self: Box<Self>, _env: &mut Environment) -> Result<Launched> {
        let mut command = Command::new(&self.executable);
        command.args(&self.argv[1..]);

        #[cfg(unix)]
        {
            // Children see the name they were invoked by, not the resolved
            // path, matching the argv convention of path-searching shells.
            use std::os::unix::process::CommandExt;
            command.arg0(&self.argv[0]);
        }

        if let Some(target) = &self.redirect {
            // One open serves both output streams; the parent drops its
            // handles at spawn so only the child holds the descriptor.
            let file = open_redirect_target(target)?;
            let clone = file
                .try_clone()
                .with_context(|| format!("can't duplicate handle for {}", target.display()))?;
            command.stdout(Stdio::from(clone));
            command.stderr(Stdio::from(file));
        }

        let child = command
            .spawn()
            .with_context(|| format!("can't spawn {}", self.executable.display()))?;
        Ok(Launched::Child(child))
    }
}

/// Creates or truncates a redirection target for writing, mode `0600`.
fn open_redirect_target(target: &Path) -> Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    options
        .open(target)
        .with_context(|| format!("can't open {} for redirection", target.display()))
}

/// Resolves a bare command name against the search path.
///
/// Directories are tried in order and the first hit wins; earlier entries
/// shadow later ones. A hit must be an existing regular file that carries
/// an execute permission bit.
pub fn find_in_search_path(name: &str, search_path: &[String]) -> Option<PathBuf> {
    search_path
        .iter()
        .map(|dir| Path::new(dir).join(name))
        .find(|candidate| is_executable(candidate))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
