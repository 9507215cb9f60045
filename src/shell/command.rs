// Copyright 2018-2024 the Deno authors. MIT license.

use futures::FutureExt;

use super::commands::ExecutableCommand;
use super::commands::ShellCommand;
use super::commands::ShellCommandContext;
use super::types::ExecuteResult;
use super::types::FutureExecuteResult;

/// An external program that still needs to be found.
#[derive(Debug, Clone)]
pub struct UnresolvedCommand {
  pub name: String,
  /// Job text when the program should run in the background.
  pub background_text: Option<String>,
}

pub fn execute_unresolved_command(
  command: UnresolvedCommand,
  mut context: ShellCommandContext,
) -> FutureExecuteResult {
  async move {
    let command_path = match context.state.resolve_command_path(&command.name)
    {
      Ok(command_path) => command_path,
      Err(err) => {
        let _ = context.stderr.write_line(&err.to_string());
        return ExecuteResult::from_exit_code(err.exit_code());
      }
    };
    let mut executable = ExecutableCommand::new(command.name, command_path);
    if let Some(text) = command.background_text {
      executable = executable.in_background(text);
    }
    executable.execute(context).await
  }
  .boxed_local()
}
