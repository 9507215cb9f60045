// Copyright 2018-2024 the Deno authors. MIT license.

use std::path::Path;
use std::path::PathBuf;

use anyhow::Result;

/// Similar to `std::fs::canonicalize()` but strips UNC prefixes on Windows.
pub fn canonicalize_path(path: &Path) -> Result<PathBuf> {
  Ok(deno_path_util::strip_unc_prefix(path.canonicalize()?))
}

/// Opens a file for writing the output of a command, creating it when
/// missing and truncating it otherwise.
pub fn create_output_file(path: &Path) -> std::io::Result<std::fs::File> {
  let mut options = std::fs::OpenOptions::new();
  options.write(true).create(true).truncate(true);
  #[cfg(unix)]
  {
    use std::os::unix::fs::OpenOptionsExt;
    options.mode(0o644);
  }
  options.open(path)
}

#[cfg(test)]
mod test {
  use super::*;
  use pretty_assertions::assert_eq;

  #[test]
  fn output_file_is_truncated() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.txt");
    std::fs::write(&path, "some longer text").unwrap();
    {
      use std::io::Write;
      let mut file = create_output_file(&path).unwrap();
      file.write_all(b"new").unwrap();
    }
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
  }

  #[cfg(unix)]
  #[test]
  fn output_file_mode() {
    use std::os::unix::fs::PermissionsExt;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("created.txt");
    create_output_file(&path).unwrap();
    let mode = std::fs::metadata(&path).unwrap().permissions().mode();
    // the umask can only remove bits
    assert_eq!(mode & 0o7133, 0);
    assert_eq!(mode & 0o600, 0o600);
  }

  #[test]
  fn canonicalizes() {
    let dir = tempfile::tempdir().unwrap();
    let path = canonicalize_path(&dir.path().join(".")).unwrap();
    assert!(path.is_absolute());
    assert!(!path.ends_with("."));
  }
}
