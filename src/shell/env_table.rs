// Copyright 2018-2025 the Deno authors. MIT license.

use thiserror::Error;

/// Default maximum number of variables a table holds.
pub const DEFAULT_MAX_VARS: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvVar {
  pub name: String,
  pub value: String,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum EnvTableError {
  #[error("variable table is full ({max} entries), cannot add '{name}'")]
  CapacityExceeded { name: String, max: usize },
}

/// Shell-local variables.
///
/// These are only used for `$NAME` expansion and are never exported to
/// spawned processes. Names are unique. Removal moves the last entry into
/// the freed slot, so iteration order is not stable.
#[derive(Debug, Clone)]
pub struct EnvTable {
  entries: Vec<EnvVar>,
  max_len: Option<usize>,
}

impl Default for EnvTable {
  fn default() -> Self {
    Self::with_max_len(Some(DEFAULT_MAX_VARS))
  }
}

impl EnvTable {
  /// Creates a table that holds at most `max_len` variables, or any number
  /// when `None`.
  pub fn with_max_len(max_len: Option<usize>) -> Self {
    Self {
      entries: Vec::new(),
      max_len,
    }
  }

  pub fn max_len(&self) -> Option<usize> {
    self.max_len
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn get(&self, name: &str) -> Option<&str> {
    self
      .position(name)
      .map(|index| self.entries[index].value.as_str())
  }

  /// Checks whether `set` would succeed for `name` without changing the
  /// table.
  pub fn ensure_can_set(&self, name: &str) -> Result<(), EnvTableError> {
    match self.max_len {
      Some(max) if self.entries.len() >= max && self.position(name).is_none() => {
        Err(EnvTableError::CapacityExceeded {
          name: name.to_string(),
          max,
        })
      }
      _ => Ok(()),
    }
  }

  /// Sets `name` to `value`, replacing any previous value.
  pub fn set(&mut self, name: &str, value: &str) -> Result<(), EnvTableError> {
    if let Some(index) = self.position(name) {
      self.entries[index].value = value.to_string();
      return Ok(());
    }
    self.ensure_can_set(name)?;
    self.entries.push(EnvVar {
      name: name.to_string(),
      value: value.to_string(),
    });
    Ok(())
  }

  /// Removes `name`, returning its value. Removing a variable that was
  /// never set does nothing.
  pub fn unset(&mut self, name: &str) -> Option<String> {
    let index = self.position(name)?;
    Some(self.entries.swap_remove(index).value)
  }

  pub fn iter(&self) -> impl Iterator<Item = &EnvVar> {
    self.entries.iter()
  }

  fn position(&self, name: &str) -> Option<usize> {
    self.entries.iter().position(|entry| entry.name == name)
  }
}
