// Copyright 2018-2025 the Deno authors. MIT license.

use anyhow::Result;
use tokio::io::AsyncBufRead;
use tokio::io::AsyncBufReadExt;

use super::execute::execute_line;
use super::types::ShellConfig;
use super::types::ShellPipeReader;
use super::types::ShellPipeWriter;
use super::types::ShellState;

/// Reads and executes lines until the input ends or an exit line is read.
///
/// Finished background jobs are reported on `stderr` before each prompt.
/// Only failing to read the input or to write to the terminal ends the
/// loop with an error.
pub async fn run_repl(
  mut reader: impl AsyncBufRead + Unpin,
  state: &mut ShellState,
  config: &ShellConfig,
  mut stdout: ShellPipeWriter,
  mut stderr: ShellPipeWriter,
) -> Result<()> {
  let mut line = String::new();
  loop {
    for job in state.jobs().reap_finished() {
      stderr.write_line(&job.to_string())?;
    }
    stdout.write_all(config.prompt.as_bytes())?;

    line.clear();
    match reader.read_line(&mut line).await {
      Ok(0) => break,
      Ok(_) => {}
      Err(err) if err.kind() == std::io::ErrorKind::InvalidData => {
        stderr.write_line("xsh: ignoring line that is not valid UTF-8")?;
        continue;
      }
      Err(err) => return Err(err.into()),
    }

    let line = trim_line_ending(&line);
    if is_exit_line(line) {
      break;
    }
    let exit_code = execute_line(
      line,
      state,
      ShellPipeReader::stdin(),
      stdout.try_clone()?,
      stderr.try_clone()?,
    )
    .await;
    tracing::debug!(exit_code, "line finished");
  }
  Ok(())
}

/// Whether the line asks to end the session.
pub fn is_exit_line(line: &str) -> bool {
  line == "exit" || line == "quit"
}

fn trim_line_ending(line: &str) -> &str {
  let line = line.strip_suffix('\n').unwrap_or(line);
  line.strip_suffix('\r').unwrap_or(line)
}
