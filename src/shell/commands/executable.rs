// Copyright 2018-2024 the Deno authors. MIT license.

use std::path::PathBuf;
use std::process::ExitStatus;

use futures::FutureExt;

use crate::shell::types::ExecuteResult;
use crate::shell::types::FutureExecuteResult;
use crate::shell::types::ShellPipeWriter;

use super::ShellCommand;
use super::ShellCommandContext;

/// Command that executes a resolved program in a separate process.
pub struct ExecutableCommand {
  display_name: String,
  command_path: PathBuf,
  /// Text to list the job under when it runs in the background.
  background_text: Option<String>,
}

impl ExecutableCommand {
  pub fn new(display_name: String, command_path: PathBuf) -> Self {
    Self {
      display_name,
      command_path,
      background_text: None,
    }
  }

  /// Runs the program without waiting for it, registering it as a job.
  pub fn in_background(mut self, text: String) -> Self {
    self.background_text = Some(text);
    self
  }
}

impl ShellCommand for ExecutableCommand {
  fn execute(&self, context: ShellCommandContext) -> FutureExecuteResult {
    let display_name = self.display_name.clone();
    let command_path = self.command_path.clone();
    let background_text = self.background_text.clone();
    async move {
      let mut stderr = context.stderr;
      let child_stderr = match stderr.try_clone() {
        Ok(writer) => writer,
        Err(err) => {
          let _ = stderr
            .write_line(&format!("Error launching '{display_name}': {err}"));
          return ExecuteResult::from_exit_code(1);
        }
      };
      let mut sub_command = tokio::process::Command::new(&command_path);
      let child = sub_command
        .current_dir(context.state.cwd())
        .args(&context.args)
        .stdin(context.stdin.into_stdio())
        .stdout(context.stdout.into_stdio())
        .stderr(child_stderr.into_stdio())
        .spawn();

      let mut child = match child {
        Ok(child) => child,
        Err(err) => {
          let _ = stderr
            .write_line(&format!("Error launching '{display_name}': {err}"));
          return ExecuteResult::from_exit_code(1);
        }
      };

      // avoid deadlock since this is holding onto the pipes
      drop(sub_command);

      let pid = child.id().unwrap_or_default();
      tracing::debug!(pid, command = %display_name, "spawned process");

      let Some(background_text) = background_text else {
        let exit_code = match child.wait().await {
          Ok(status) => {
            report_signal(&status, &display_name, &mut stderr);
            exit_code_from_status(status)
          }
          Err(err) => {
            let _ = stderr.write_line(&format!("{display_name}: {err}"));
            1
          }
        };
        return ExecuteResult::from_exit_code(exit_code);
      };

      let handle = tokio::task::spawn_local(async move {
        match child.wait().await {
          Ok(status) => exit_code_from_status(status),
          Err(err) => {
            tracing::warn!(pid, "failed waiting for background job: {err}");
            1
          }
        }
      });
      let id = context.state.jobs().push(pid, background_text, handle);
      let _ = stderr.write_line(&format!("[{id}] {pid}"));
      ExecuteResult::from_exit_code(0)
    }
    .boxed_local()
  }
}

/// Gets the exit code of a finished process. Processes that were killed
/// by a signal get 128 plus the signal number, like in bash.
pub fn exit_code_from_status(status: ExitStatus) -> i32 {
  match status.code() {
    Some(code) => code,
    None => terminating_signal(&status).map(|signal| 128 + signal).unwrap_or(1),
  }
}

fn report_signal(
  status: &ExitStatus,
  display_name: &str,
  stderr: &mut ShellPipeWriter,
) {
  if let Some(signal) = terminating_signal(status) {
    let _ = stderr.write_line(&format!(
      "{display_name}: terminated by {}",
      signal_name(signal)
    ));
  }
}

#[cfg(unix)]
fn terminating_signal(status: &ExitStatus) -> Option<i32> {
  use std::os::unix::process::ExitStatusExt;
  status.signal()
}

#[cfg(not(unix))]
fn terminating_signal(_status: &ExitStatus) -> Option<i32> {
  None
}

#[cfg(unix)]
fn signal_name(signal: i32) -> String {
  match nix::sys::signal::Signal::try_from(signal) {
    Ok(signal) => signal.as_str().to_string(),
    Err(_) => format!("signal {signal}"),
  }
}

#[cfg(not(unix))]
fn signal_name(signal: i32) -> String {
  format!("signal {signal}")
}

#[cfg(all(test, unix))]
mod test {
  use super::*;
  use pretty_assertions::assert_eq;
  use std::os::unix::process::ExitStatusExt;

  #[test]
  fn exit_codes() {
    // raw wait statuses: exit code in the high byte, signal in the low bits
    assert_eq!(exit_code_from_status(ExitStatus::from_raw(0)), 0);
    assert_eq!(exit_code_from_status(ExitStatus::from_raw(3 << 8)), 3);
    assert_eq!(exit_code_from_status(ExitStatus::from_raw(9)), 137);
    assert_eq!(exit_code_from_status(ExitStatus::from_raw(15)), 143);
  }

  #[test]
  fn signal_names() {
    assert_eq!(signal_name(9), "SIGKILL");
    assert_eq!(signal_name(15), "SIGTERM");
    assert_eq!(signal_name(1000), "signal 1000");
  }
}
