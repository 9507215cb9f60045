// Copyright 2018-2025 the Deno authors. MIT license.

use std::path::Path;
use std::path::PathBuf;

use thiserror::Error;

/// Error when a command path could not be resolved.
#[derive(Error, Debug, PartialEq)]
pub enum CommandPathResolutionError {
  #[error("{0}: command not found")]
  CommandNotFound(String),
  #[error("{0}: failed canonicalizing")]
  FailedCanonicalizing(String),
  #[error("command name was empty")]
  CommandEmpty,
}

impl CommandPathResolutionError {
  pub fn exit_code(&self) -> i32 {
    match self {
      // Use the Exit status that is used in bash: https://www.gnu.org/software/bash/manual/bash.html#Exit-Status
      CommandPathResolutionError::CommandNotFound(_) => 127,
      CommandPathResolutionError::CommandEmpty
      | CommandPathResolutionError::FailedCanonicalizing(_) => 1,
    }
  }
}

/// Resolves a command name to an absolute path.
///
/// Bare names are searched for in the `PATH` of the interpreter process.
/// Names with more than one path component are taken relative to
/// `base_dir`.
pub fn resolve_command_path(
  command_name: &str,
  base_dir: &Path,
) -> Result<PathBuf, CommandPathResolutionError> {
  if command_name.is_empty() {
    return Err(CommandPathResolutionError::CommandEmpty);
  }

  // check for absolute or relative path
  let path = Path::new(command_name);
  if path.is_absolute() {
    return Ok(path.to_path_buf());
  } else if path.components().count() > 1 {
    return Ok(base_dir.join(command_name));
  }

  let result = which::which_in(command_name, std::env::var_os("PATH"), base_dir);
  result.map_err(|err| match err {
    which::Error::CannotCanonicalize => {
      CommandPathResolutionError::FailedCanonicalizing(command_name.to_string())
    }
    _ => CommandPathResolutionError::CommandNotFound(command_name.to_string()),
  })
}
