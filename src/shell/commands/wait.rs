// Copyright 2018-2025 the Deno authors. MIT license.

use futures::FutureExt;
use futures::future::LocalBoxFuture;

use crate::shell::types::ExecuteResult;

use super::ShellCommand;
use super::ShellCommandContext;

/// Waits for every background job and reports each one as it is reaped.
pub struct WaitCommand;

impl ShellCommand for WaitCommand {
  fn execute(
    &self,
    mut context: ShellCommandContext,
  ) -> LocalBoxFuture<'static, ExecuteResult> {
    async move {
      if !context.args.is_empty() {
        let _ = context
          .stderr
          .write_line("wait: waiting for specific jobs is not supported");
        return ExecuteResult::from_exit_code(1);
      }
      for job in context.state.jobs().wait_all().await {
        let _ = context.stdout.write_line(&job.to_string());
      }
      ExecuteResult::from_exit_code(0)
    }
    .boxed_local()
  }
}
