// Copyright 2018-2025 the Deno authors. MIT license.

use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

use xsh::DEFAULT_MAX_VARS;
use xsh::DEFAULT_PROMPT;
use xsh::ShellConfig;
use xsh::ShellPipeWriter;
use xsh::ShellState;
use xsh::run_repl;

const LOG_ENV_VAR: &str = "XSH_LOG";

/// Small interactive command interpreter.
#[derive(Parser, Debug)]
#[command(name = "xsh", version, about)]
struct Args {
  /// Text written before each line is read.
  #[arg(long, default_value = DEFAULT_PROMPT)]
  prompt: String,
  /// Maximum number of shell variables. 0 disables the limit.
  #[arg(long, default_value_t = DEFAULT_MAX_VARS)]
  max_vars: usize,
  /// Log filter such as `debug` or `xsh=trace`. Takes precedence over
  /// the XSH_LOG environment variable.
  #[arg(long)]
  log_level: Option<String>,
}

impl Args {
  fn config(&self) -> ShellConfig {
    ShellConfig {
      prompt: self.prompt.clone(),
      max_vars: match self.max_vars {
        0 => None,
        max => Some(max),
      },
    }
  }
}

fn init_logging(log_level: Option<&str>) -> Result<()> {
  let filter = match log_level {
    Some(log_level) => EnvFilter::try_new(log_level)
      .with_context(|| format!("invalid log level: {log_level}"))?,
    None => EnvFilter::try_from_env(LOG_ENV_VAR)
      .unwrap_or_else(|_| EnvFilter::new("warn")),
  };
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .init();
  Ok(())
}

fn main() -> Result<()> {
  let args = Args::parse();
  init_logging(args.log_level.as_deref())?;
  let runtime = tokio::runtime::Builder::new_current_thread()
    .enable_all()
    .build()?;
  let local = tokio::task::LocalSet::new();
  local.block_on(&runtime, run(args.config()))
}

async fn run(config: ShellConfig) -> Result<()> {
  let cwd = std::env::current_dir()
    .context("failed to resolve the current directory")?;
  tracing::debug!(cwd = %cwd.display(), ?config, "starting session");
  let mut state = ShellState::new(cwd, &config);

  // the terminal delivers Ctrl-C to the foreground child, the
  // interpreter itself keeps running
  tokio::task::spawn_local(async {
    while tokio::signal::ctrl_c().await.is_ok() {
      tracing::debug!("received interrupt");
    }
  });

  run_repl(
    BufReader::new(tokio::io::stdin()),
    &mut state,
    &config,
    ShellPipeWriter::stdout(),
    ShellPipeWriter::stderr(),
  )
  .await
}
