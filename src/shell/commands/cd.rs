// Copyright 2018-2025 the Deno authors. MIT license.

use std::path::Path;
use std::path::PathBuf;

use anyhow::Result;
use anyhow::bail;
use futures::future::LocalBoxFuture;
use path_dedot::ParseDot;

use crate::shell::fs_util;
use crate::shell::types::EnvChange;
use crate::shell::types::ExecuteResult;

use super::ShellCommand;
use super::ShellCommandContext;

pub struct CdCommand;

impl ShellCommand for CdCommand {
  fn execute(
    &self,
    mut context: ShellCommandContext,
  ) -> LocalBoxFuture<'static, ExecuteResult> {
    let result = match execute_cd(context.state.cwd(), &context.args) {
      Ok(new_dir) => ExecuteResult::with_changes(vec![EnvChange::Cd(new_dir)]),
      Err(err) => {
        let _ = context.stderr.write_line(&format!("cd: {err}"));
        ExecuteResult::from_exit_code(1)
      }
    };
    Box::pin(futures::future::ready(result))
  }
}

fn execute_cd(cwd: &Path, args: &[String]) -> Result<PathBuf> {
  let path = parse_args(args)?;
  let new_dir = cwd.join(path);
  let new_dir = match new_dir.parse_dot() {
    Ok(path) => path.to_path_buf(),
    // fallback to canonicalize path just in case
    Err(_) => fs_util::canonicalize_path(&new_dir)?,
  };
  match std::fs::metadata(&new_dir) {
    Ok(metadata) if metadata.is_dir() => Ok(new_dir),
    Ok(_) => bail!("{}: Not a directory", path),
    Err(err) => bail!("{}: {}", path, err),
  }
}

fn parse_args(args: &[String]) -> Result<&str> {
  match args {
    [path] => Ok(path.as_str()),
    _ => bail!("expected 1 argument, found {}", args.len()),
  }
}

#[cfg(test)]
mod test {
  use std::fs;
  use tempfile::tempdir;

  use super::*;
  use pretty_assertions::assert_eq;

  fn args(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
  }

  #[test]
  fn parses_args() {
    assert_eq!(parse_args(&args(&["test"])).unwrap(), "test");
    // flags are treated as paths
    assert_eq!(parse_args(&args(&["-a"])).unwrap(), "-a");
    assert_eq!(
      parse_args(&args(&["a", "b"])).err().unwrap().to_string(),
      "expected 1 argument, found 2"
    );
    assert_eq!(
      parse_args(&[]).err().unwrap().to_string(),
      "expected 1 argument, found 0"
    );
  }

  #[test]
  fn gets_new_cd() {
    let dir = tempdir().unwrap();
    let dir_path = fs_util::canonicalize_path(dir.path()).unwrap();

    // non-existent
    let err = execute_cd(&dir_path, &args(&["non-existent"]))
      .err()
      .unwrap()
      .to_string();
    assert!(err.starts_with("non-existent: "), "{err}");
    assert_ne!(err, "non-existent: Not a directory");

    // existent file
    fs::write(dir_path.join("file.txt"), "").unwrap();
    assert_eq!(
      execute_cd(&dir_path, &args(&["file.txt"]))
        .err()
        .unwrap()
        .to_string(),
      "file.txt: Not a directory"
    );

    // existent dir
    let sub_dir_path = dir_path.join("sub_dir");
    fs::create_dir(&sub_dir_path).unwrap();
    assert_eq!(
      execute_cd(&dir_path, &args(&["sub_dir"])).unwrap(),
      sub_dir_path
    );

    // dots are normalized
    assert_eq!(
      execute_cd(&sub_dir_path, &args(&[".."])).unwrap(),
      dir_path
    );
    assert_eq!(
      execute_cd(&dir_path, &args(&["./sub_dir/../sub_dir/."])).unwrap(),
      sub_dir_path
    );

    // absolute paths ignore the current directory
    assert_eq!(
      execute_cd(&sub_dir_path, &[dir_path.to_string_lossy().to_string()])
        .unwrap(),
      dir_path
    );
  }
}
