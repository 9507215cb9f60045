// Copyright 2018-2025 the Deno authors. MIT license.

use std::fs::File;
use std::path::Path;

use anyhow::Context;
use anyhow::Result;

use crate::parser::ParsedCommand;
use crate::parser::RedirectOp;
use crate::parser::parse;

use super::command::UnresolvedCommand;
use super::command::execute_unresolved_command;
use super::commands::ShellCommandContext;
use super::expand::expand_vars;
use super::fs_util;
use super::types::ExecuteResult;
use super::types::ShellPipeReader;
use super::types::ShellPipeWriter;
use super::types::ShellState;

/// Exit code used when a line can't be parsed.
pub const PARSE_ERROR_EXIT_CODE: i32 = 2;

/// Expands, parses and runs a single line of input.
///
/// Errors are written to `stderr` and turned into a non-zero exit code,
/// so they never outlive the line. Changes made by built-in commands are
/// applied to `state` before returning.
///
/// # Arguments
///
/// * `line` - The raw line, without its line terminator.
/// * `state` - The state shared by every line of the session.
/// * `stdin` - Input for the command when it isn't redirected.
/// * `stdout` - Output for the command when it isn't redirected.
/// * `stderr` - Receives errors and is inherited by spawned programs.
///
/// # Returns
///
/// The exit code of the line.
pub async fn execute_line(
  line: &str,
  state: &mut ShellState,
  stdin: ShellPipeReader,
  stdout: ShellPipeWriter,
  mut stderr: ShellPipeWriter,
) -> i32 {
  let expanded = expand_vars(line, state.vars());
  tracing::debug!(line = %expanded, "expanded line");
  let command = match parse(&expanded) {
    Ok(Some(command)) => command,
    Ok(None) => return 0,
    Err(err) => {
      let _ = stderr.write_line(&format!("{err}"));
      return PARSE_ERROR_EXIT_CODE;
    }
  };
  tracing::debug!(?command, "parsed command");

  let result =
    execute_command(command, state.clone(), stdin, stdout, stderr).await;
  state.apply_changes(&result.changes);
  result.exit_code
}

async fn execute_command(
  command: ParsedCommand,
  state: ShellState,
  stdin: ShellPipeReader,
  stdout: ShellPipeWriter,
  mut stderr: ShellPipeWriter,
) -> ExecuteResult {
  let redirects = match resolve_redirects(&command, state.cwd()) {
    Ok(redirects) => redirects,
    Err(err) => {
      let _ = stderr.write_line(&format!("{err:#}"));
      return ExecuteResult::from_exit_code(1);
    }
  };
  let stdin = match redirects.input {
    Some(file) => ShellPipeReader::from_std(file),
    None => stdin,
  };
  let stdout = match redirects.output {
    Some(file) => ShellPipeWriter::from_std(file),
    None => stdout,
  };

  let background_text = command.background.then(|| command.display_text());
  let mut args = command.args.into_iter();
  let Some(command_name) = args.next() else {
    // only redirects, the files were opened and are closed again
    return ExecuteResult::from_exit_code(0);
  };
  let context = ShellCommandContext {
    args: args.collect(),
    state,
    stdin,
    stdout,
    stderr,
  };

  match context.state.resolve_builtin(&command_name) {
    Some(builtin) => {
      if background_text.is_some() {
        tracing::debug!(command = %command_name, "running built-in in foreground");
      }
      builtin.execute(context).await
    }
    None => {
      execute_unresolved_command(
        UnresolvedCommand {
          name: command_name,
          background_text,
        },
        context,
      )
      .await
    }
  }
}

#[derive(Debug, Default)]
struct RedirectFiles {
  input: Option<File>,
  output: Option<File>,
}

/// Opens every redirect of the command in order. The last one of each
/// kind is kept and earlier files are closed again.
fn resolve_redirects(command: &ParsedCommand, cwd: &Path) -> Result<RedirectFiles> {
  let mut files = RedirectFiles::default();
  for redirect in &command.redirects {
    let path = cwd.join(&redirect.path);
    let error_context =
      || format!("error opening file for redirect ({})", path.display());
    match redirect.op {
      RedirectOp::Input => {
        files.input = Some(File::open(&path).with_context(error_context)?);
      }
      RedirectOp::Output => {
        files.output =
          Some(fs_util::create_output_file(&path).with_context(error_context)?);
      }
    }
  }
  Ok(files)
}
