// Copyright 2018-2024 the Deno authors. MIT license.

use anyhow::Result;
use anyhow::bail;
use futures::future::LocalBoxFuture;

use crate::shell::types::EnvChange;
use crate::shell::types::ExecuteResult;

use super::ShellCommand;
use super::ShellCommandContext;

pub struct UnsetCommand;

impl ShellCommand for UnsetCommand {
  fn execute(
    &self,
    mut context: ShellCommandContext,
  ) -> LocalBoxFuture<'static, ExecuteResult> {
    let result = match parse_name(&context.args) {
      Ok(name) => {
        ExecuteResult::with_changes(vec![EnvChange::UnsetVar(name.to_string())])
      }
      Err(err) => {
        let _ = context.stderr.write_line(&format!("unset: {err}"));
        ExecuteResult::from_exit_code(1)
      }
    };
    Box::pin(futures::future::ready(result))
  }
}

fn parse_name(args: &[String]) -> Result<&str> {
  match args {
    [name] => Ok(name.as_str()),
    _ => bail!("expected 1 argument, found {}", args.len()),
  }
}
