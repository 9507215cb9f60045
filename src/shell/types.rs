// Copyright 2018-2025 the Deno authors. MIT license.

use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::Result;
use futures::future::LocalBoxFuture;
use tokio::task::JoinHandle;

use super::commands::ShellCommand;
use super::commands::builtin_commands;
use super::env_table::DEFAULT_MAX_VARS;
use super::env_table::EnvTable;
use super::jobs::JobList;
use super::which::CommandPathResolutionError;

pub const DEFAULT_PROMPT: &str = "xsh# ";

/// Settings for an interactive session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
  /// Text written before reading each line.
  pub prompt: String,
  /// Maximum number of shell variables, or `None` for no limit.
  pub max_vars: Option<usize>,
}

impl Default for ShellConfig {
  fn default() -> Self {
    Self {
      prompt: DEFAULT_PROMPT.to_string(),
      max_vars: Some(DEFAULT_MAX_VARS),
    }
  }
}

/// State that persists from one line to the next.
#[derive(Clone)]
pub struct ShellState {
  /// Variables used when expanding `$NAME`. These are not passed down
  /// to sub commands.
  vars: EnvTable,
  cwd: PathBuf,
  commands: Rc<HashMap<String, Rc<dyn ShellCommand>>>,
  jobs: JobList,
}

impl ShellState {
  pub fn new(cwd: PathBuf, config: &ShellConfig) -> Self {
    assert!(cwd.is_absolute());
    Self {
      vars: EnvTable::with_max_len(config.max_vars),
      cwd,
      commands: Rc::new(builtin_commands()),
      jobs: JobList::default(),
    }
  }

  pub fn cwd(&self) -> &PathBuf {
    &self.cwd
  }

  pub fn vars(&self) -> &EnvTable {
    &self.vars
  }

  pub fn get_var(&self, name: &str) -> Option<&str> {
    self.vars.get(name)
  }

  pub fn jobs(&self) -> &JobList {
    &self.jobs
  }

  pub fn set_cwd(&mut self, cwd: PathBuf) {
    self.cwd = cwd;
  }

  pub fn apply_changes(&mut self, changes: &[EnvChange]) {
    for change in changes {
      self.apply_change(change);
    }
  }

  pub fn apply_change(&mut self, change: &EnvChange) {
    match change {
      EnvChange::SetVar(name, value) => {
        if let Err(err) = self.vars.set(name, value) {
          tracing::warn!(name = %name, "{err}");
        }
      }
      EnvChange::UnsetVar(name) => {
        self.vars.unset(name);
      }
      EnvChange::Cd(new_dir) => {
        self.set_cwd(new_dir.clone());
      }
    }
  }

  /// Resolves a built-in command by its exact name.
  pub fn resolve_builtin(&self, name: &str) -> Option<Rc<dyn ShellCommand>> {
    // uses an Rc to allow resolving a command without borrowing from self
    self.commands.get(name).cloned()
  }

  /// Resolves the path to an external command from the current
  /// working directory.
  pub fn resolve_command_path(
    &self,
    command_name: &str,
  ) -> Result<PathBuf, CommandPathResolutionError> {
    super::which::resolve_command_path(command_name, self.cwd())
  }
}

#[derive(Debug, PartialEq, Eq)]
pub enum EnvChange {
  // `set NAME VALUE`
  SetVar(String, String),
  // `unset NAME`
  UnsetVar(String),
  Cd(PathBuf),
}

pub type FutureExecuteResult = LocalBoxFuture<'static, ExecuteResult>;

#[derive(Debug, PartialEq, Eq)]
pub struct ExecuteResult {
  pub exit_code: i32,
  /// Changes to apply to the shell state once the command finished.
  pub changes: Vec<EnvChange>,
}

impl ExecuteResult {
  pub fn from_exit_code(exit_code: i32) -> ExecuteResult {
    ExecuteResult {
      exit_code,
      changes: Vec::new(),
    }
  }

  pub fn with_changes(changes: Vec<EnvChange>) -> ExecuteResult {
    ExecuteResult {
      exit_code: 0,
      changes,
    }
  }
}

/// Reader side of a pipe.
#[derive(Debug)]
pub enum ShellPipeReader {
  /// The interpreter's own standard input.
  Inherit,
  OsPipe(std::io::PipeReader),
  StdFile(std::fs::File),
}

impl ShellPipeReader {
  pub fn stdin() -> ShellPipeReader {
    ShellPipeReader::Inherit
  }

  pub fn from_std(std_file: std::fs::File) -> Self {
    Self::StdFile(std_file)
  }

  #[cfg(test)]
  #[allow(clippy::should_implement_trait)]
  pub fn from_str(data: &str) -> Self {
    let (read, mut write) = std::io::pipe().unwrap();
    write.write_all(data.as_bytes()).unwrap();
    Self::OsPipe(read)
  }

  pub fn into_stdio(self) -> std::process::Stdio {
    match self {
      Self::Inherit => std::process::Stdio::inherit(),
      Self::OsPipe(pipe) => pipe.into(),
      Self::StdFile(file) => file.into(),
    }
  }

  /// Pipe everything to the specified writer.
  pub fn pipe_to(self, writer: &mut dyn Write) -> Result<()> {
    match self {
      Self::Inherit => {
        std::io::copy(&mut std::io::stdin().lock(), writer)?;
      }
      Self::OsPipe(mut pipe) => {
        std::io::copy(&mut pipe, writer)?;
      }
      Self::StdFile(mut file) => {
        std::io::copy(&mut file, writer)?;
      }
    }
    Ok(())
  }

  /// Pipes the reader to a string handle that is resolved when the pipe's
  /// writer is closed.
  pub fn pipe_to_string_handle(self) -> JoinHandle<String> {
    tokio::task::spawn_blocking(|| {
      let mut buf = Vec::new();
      if let Err(err) = self.pipe_to(&mut buf) {
        tracing::warn!("failed reading pipe: {err:#}");
      }
      String::from_utf8_lossy(&buf).to_string()
    })
  }
}

/// Writer side of a pipe.
///
/// Ensure that all of these are dropped when complete in order to
/// prevent deadlocks where the reader hangs waiting for a read.
#[derive(Debug)]
pub enum ShellPipeWriter {
  OsPipe(std::io::PipeWriter),
  StdFile(std::fs::File),
  // Rust's stdout() and stderr() wrappers are used instead of duplicating
  // the raw handles because they deal with encoding issues on Windows.
  Stdout,
  Stderr,
}

impl ShellPipeWriter {
  pub fn stdout() -> Self {
    Self::Stdout
  }

  pub fn stderr() -> Self {
    Self::Stderr
  }

  pub fn from_std(std_file: std::fs::File) -> Self {
    Self::StdFile(std_file)
  }

  pub fn try_clone(&self) -> std::io::Result<Self> {
    Ok(match self {
      Self::OsPipe(pipe) => Self::OsPipe(pipe.try_clone()?),
      Self::StdFile(file) => Self::StdFile(file.try_clone()?),
      Self::Stdout => Self::Stdout,
      Self::Stderr => Self::Stderr,
    })
  }

  pub fn into_stdio(self) -> std::process::Stdio {
    match self {
      Self::OsPipe(pipe) => pipe.into(),
      Self::StdFile(file) => file.into(),
      Self::Stdout | Self::Stderr => std::process::Stdio::inherit(),
    }
  }

  pub fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
    match self {
      Self::OsPipe(pipe) => pipe.write_all(bytes)?,
      Self::StdFile(file) => file.write_all(bytes)?,
      // flush after each write in order to bypass Rust's internal buffer
      Self::Stdout => {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(bytes)?;
        stdout.flush()?;
      }
      Self::Stderr => {
        let mut stderr = std::io::stderr().lock();
        stderr.write_all(bytes)?;
        stderr.flush()?;
      }
    }
    Ok(())
  }

  pub fn write_line(&mut self, line: &str) -> Result<()> {
    let bytes = format!("{line}\n");
    self.write_all(bytes.as_bytes())
  }
}

/// Creates an OS pipe.
pub fn pipe() -> std::io::Result<(ShellPipeReader, ShellPipeWriter)> {
  let (reader, writer) = std::io::pipe()?;
  Ok((
    ShellPipeReader::OsPipe(reader),
    ShellPipeWriter::OsPipe(writer),
  ))
}

/// Creates a writer along with a handle that resolves to everything
/// written to it once all clones of the writer are dropped.
pub fn get_output_writer_and_handle()
-> std::io::Result<(ShellPipeWriter, JoinHandle<String>)> {
  let (reader, writer) = pipe()?;
  let handle = reader.pipe_to_string_handle();
  Ok((writer, handle))
}
