// Copyright 2018-2025 the Deno authors. MIT license.

mod command;
mod commands;
mod env_table;
mod execute;
mod expand;
mod fs_util;
mod jobs;
mod repl;
mod types;
mod which;

pub use commands::ExecutableCommand;
pub use commands::ShellCommand;
pub use commands::ShellCommandContext;
pub use env_table::DEFAULT_MAX_VARS;
pub use env_table::EnvTable;
pub use env_table::EnvTableError;
pub use env_table::EnvVar;
pub use execute::PARSE_ERROR_EXIT_CODE;
pub use execute::execute_line;
pub use expand::expand_vars;
pub use jobs::FinishedJob;
pub use jobs::JobList;
pub use jobs::RunningJob;
pub use repl::is_exit_line;
pub use repl::run_repl;
pub use types::*;
pub use which::CommandPathResolutionError;

#[cfg(test)]
mod test_builder;
