// Copyright 2018-2025 the Deno authors. MIT license.

use anyhow::Result;
use anyhow::bail;
use futures::future::LocalBoxFuture;

use crate::shell::env_table::EnvTable;
use crate::shell::types::EnvChange;
use crate::shell::types::ExecuteResult;

use super::ShellCommand;
use super::ShellCommandContext;

pub struct SetCommand;

impl ShellCommand for SetCommand {
  fn execute(
    &self,
    mut context: ShellCommandContext,
  ) -> LocalBoxFuture<'static, ExecuteResult> {
    let result = match execute_set(context.state.vars(), &context.args) {
      Ok(change) => ExecuteResult::with_changes(vec![change]),
      Err(err) => {
        let _ = context.stderr.write_line(&format!("set: {err}"));
        ExecuteResult::from_exit_code(1)
      }
    };
    Box::pin(futures::future::ready(result))
  }
}

fn execute_set(vars: &EnvTable, args: &[String]) -> Result<EnvChange> {
  let (name, value) = parse_args(args)?;
  // checked here so a full table is reported as a failure of this command
  vars.ensure_can_set(name)?;
  Ok(EnvChange::SetVar(name.to_string(), value.to_string()))
}

fn parse_args(args: &[String]) -> Result<(&str, &str)> {
  match args {
    [name, value] => Ok((name.as_str(), value.as_str())),
    _ => bail!("expected 2 arguments, found {}", args.len()),
  }
}
