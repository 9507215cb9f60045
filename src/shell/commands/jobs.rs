// Copyright 2018-2025 the Deno authors. MIT license.

use anyhow::Result;
use futures::future::LocalBoxFuture;

use crate::shell::types::ExecuteResult;

use super::ShellCommand;
use super::ShellCommandContext;
use super::args::ArgKind;
use super::args::parse_arg_kinds;

/// Lists the background jobs that are still running.
pub struct JobsCommand;

impl ShellCommand for JobsCommand {
  fn execute(
    &self,
    mut context: ShellCommandContext,
  ) -> LocalBoxFuture<'static, ExecuteResult> {
    let result = match parse_args(&context.args) {
      Ok(flags) => {
        for job in context.state.jobs().running() {
          let _ = context.stdout.write_line(&job.display(flags.with_pid));
        }
        ExecuteResult::from_exit_code(0)
      }
      Err(err) => {
        let _ = context.stderr.write_line(&format!("jobs: {err}"));
        ExecuteResult::from_exit_code(1)
      }
    };
    Box::pin(futures::future::ready(result))
  }
}

#[derive(Debug, PartialEq, Default)]
struct JobsFlags {
  with_pid: bool,
}

fn parse_args(args: &[String]) -> Result<JobsFlags> {
  let mut flags = JobsFlags::default();
  for arg in parse_arg_kinds(args) {
    match arg {
      ArgKind::ShortFlag('l') => flags.with_pid = true,
      _ => arg.bail_unsupported()?,
    }
  }
  Ok(flags)
}
