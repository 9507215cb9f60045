// Copyright 2018-2025 the Deno authors. MIT license.

use anyhow::Context;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::PathBuf;

use crate::shell::execute::execute_line;
use crate::shell::fs_util;
use crate::shell::types::EnvChange;
use crate::shell::types::ShellConfig;
use crate::shell::types::ShellPipeReader;
use crate::shell::types::ShellState;
use crate::shell::types::get_output_writer_and_handle;

enum TestAssertion {
  FileExists(String),
  FileNotExists(String),
  FileTextEquals(String, String),
  VarEquals(String, Option<String>),
  CwdEquals(String),
}

struct TempDir {
  // hold to keep it alive until drop
  _inner: tempfile::TempDir,
  cwd: PathBuf,
}

impl TempDir {
  pub fn new() -> Self {
    let temp_dir = tempfile::tempdir().unwrap();
    let cwd = fs_util::canonicalize_path(temp_dir.path()).unwrap();
    Self {
      _inner: temp_dir,
      cwd,
    }
  }
}

/// Runs lines in a single session and checks what they did.
///
/// Every line gets the same stdin text. The exit code checked is the one
/// of the last line. `$TEMP_DIR` in expected output is replaced with the
/// session's starting directory. Background jobs are waited for before
/// the output is collected.
pub struct TestBuilder {
  // it is much much faster to lazily create this
  temp_dir: Option<TempDir>,
  config: ShellConfig,
  vars: Vec<(String, String)>,
  lines: Vec<String>,
  stdin: Vec<u8>,
  expected_exit_code: i32,
  expected_stderr: String,
  expected_stdout: String,
  assertions: Vec<TestAssertion>,
}

impl TestBuilder {
  pub fn new() -> Self {
    Self {
      temp_dir: None,
      config: ShellConfig::default(),
      vars: Default::default(),
      lines: Default::default(),
      stdin: Default::default(),
      expected_exit_code: 0,
      expected_stderr: Default::default(),
      expected_stdout: Default::default(),
      assertions: Default::default(),
    }
  }

  pub fn ensure_temp_dir(&mut self) -> &mut Self {
    self.get_temp_dir();
    self
  }

  fn get_temp_dir(&mut self) -> &mut TempDir {
    self.temp_dir.get_or_insert_with(TempDir::new)
  }

  pub fn temp_dir_path(&mut self) -> PathBuf {
    self.get_temp_dir().cwd.clone()
  }

  /// Adds a line to run. Lines run in the order they were added.
  pub fn command(&mut self, line: &str) -> &mut Self {
    self.lines.push(line.to_string());
    self
  }

  pub fn stdin(&mut self, stdin: &str) -> &mut Self {
    self.stdin = stdin.as_bytes().to_vec();
    self
  }

  pub fn max_vars(&mut self, max_vars: Option<usize>) -> &mut Self {
    self.config.max_vars = max_vars;
    self
  }

  pub fn directory(&mut self, path: &str) -> &mut Self {
    let temp_dir = self.get_temp_dir();
    fs::create_dir_all(temp_dir.cwd.join(path)).unwrap();
    self
  }

  pub fn var(&mut self, name: &str, value: &str) -> &mut Self {
    self.vars.push((name.to_string(), value.to_string()));
    self
  }

  pub fn file(&mut self, path: &str, text: &str) -> &mut Self {
    let temp_dir = self.get_temp_dir();
    fs::write(temp_dir.cwd.join(path), text).unwrap();
    self
  }

  pub fn assert_exit_code(&mut self, code: i32) -> &mut Self {
    self.expected_exit_code = code;
    self
  }

  pub fn assert_stderr(&mut self, output: &str) -> &mut Self {
    self.expected_stderr.push_str(output);
    self
  }

  pub fn assert_stdout(&mut self, output: &str) -> &mut Self {
    self.expected_stdout.push_str(output);
    self
  }

  pub fn assert_exists(&mut self, path: &str) -> &mut Self {
    self.ensure_temp_dir();
    self
      .assertions
      .push(TestAssertion::FileExists(path.to_string()));
    self
  }

  pub fn assert_not_exists(&mut self, path: &str) -> &mut Self {
    self.ensure_temp_dir();
    self
      .assertions
      .push(TestAssertion::FileNotExists(path.to_string()));
    self
  }

  pub fn assert_file_equals(
    &mut self,
    path: &str,
    file_text: &str,
  ) -> &mut Self {
    self.ensure_temp_dir();
    self.assertions.push(TestAssertion::FileTextEquals(
      path.to_string(),
      file_text.to_string(),
    ));
    self
  }

  /// Checks the value of a shell variable after the session, where
  /// `None` means it isn't set.
  pub fn assert_var(&mut self, name: &str, value: Option<&str>) -> &mut Self {
    self.assertions.push(TestAssertion::VarEquals(
      name.to_string(),
      value.map(|value| value.to_string()),
    ));
    self
  }

  /// Checks the working directory after the session, relative to the
  /// starting directory.
  pub fn assert_cwd(&mut self, path: &str) -> &mut Self {
    self.ensure_temp_dir();
    self.assertions.push(TestAssertion::CwdEquals(path.to_string()));
    self
  }

  pub async fn run(&mut self) {
    let cwd = if let Some(temp_dir) = &self.temp_dir {
      temp_dir.cwd.clone()
    } else {
      fs_util::canonicalize_path(&std::env::temp_dir()).unwrap()
    };
    let (stdout, stdout_handle) = get_output_writer_and_handle().unwrap();
    let (stderr, stderr_handle) = get_output_writer_and_handle().unwrap();

    let mut state = ShellState::new(cwd.clone(), &self.config);
    for (name, value) in &self.vars {
      state.apply_change(&EnvChange::SetVar(name.clone(), value.clone()));
    }

    let local_set = tokio::task::LocalSet::new();
    let exit_code = local_set
      .run_until(async {
        let mut exit_code = 0;
        for line in &self.lines {
          let stdin = {
            let text = String::from_utf8_lossy(&self.stdin);
            ShellPipeReader::from_str(&text)
          };
          exit_code = execute_line(
            line,
            &mut state,
            stdin,
            stdout.try_clone().unwrap(),
            stderr.try_clone().unwrap(),
          )
          .await;
        }
        state.jobs().wait_all().await;
        exit_code
      })
      .await;
    // close the writers so the handles resolve
    drop(stdout);
    drop(stderr);

    let temp_dir = if let Some(temp_dir) = &self.temp_dir {
      temp_dir.cwd.display().to_string()
    } else {
      "NO_TEMP_DIR".to_string()
    };
    let description = self.lines.join("\n");
    assert_eq!(
      stderr_handle.await.unwrap(),
      self.expected_stderr.replace("$TEMP_DIR", &temp_dir),
      "\n\nFailed for: {}",
      description
    );
    assert_eq!(
      stdout_handle.await.unwrap(),
      self.expected_stdout.replace("$TEMP_DIR", &temp_dir),
      "\n\nFailed for: {}",
      description
    );
    assert_eq!(
      exit_code, self.expected_exit_code,
      "\n\nFailed for: {}",
      description
    );

    for assertion in &self.assertions {
      match assertion {
        TestAssertion::FileExists(path) => {
          assert!(
            cwd.join(path).exists(),
            "\n\nFailed for: {}\nExpected '{}' to exist.",
            description,
            path,
          )
        }
        TestAssertion::FileNotExists(path) => {
          assert!(
            !cwd.join(path).exists(),
            "\n\nFailed for: {}\nExpected '{}' to not exist.",
            description,
            path,
          )
        }
        TestAssertion::FileTextEquals(path, text) => {
          let actual_text = std::fs::read_to_string(cwd.join(path))
            .with_context(|| format!("Error reading {path}"))
            .unwrap();
          assert_eq!(
            &actual_text, text,
            "\n\nFailed for: {}\nPath: {}",
            description, path,
          )
        }
        TestAssertion::VarEquals(name, value) => {
          assert_eq!(
            state.get_var(name),
            value.as_deref(),
            "\n\nFailed for: {}\nVariable: {}",
            description,
            name,
          )
        }
        TestAssertion::CwdEquals(path) => {
          let expected = fs_util::canonicalize_path(&cwd.join(path)).unwrap();
          assert_eq!(
            state.cwd(),
            &expected,
            "\n\nFailed for: {}",
            description
          )
        }
      }
    }
  }
}
