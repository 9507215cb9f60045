// Copyright 2018-2024 the Deno authors. MIT license.

use anyhow::Result;
use anyhow::bail;

#[derive(Debug, PartialEq, Eq)]
pub enum ArgKind<'a> {
  ShortFlag(char),
  LongFlag(&'a str),
  Arg(&'a str),
}

impl ArgKind<'_> {
  pub fn bail_unsupported(&self) -> Result<()> {
    match self {
      ArgKind::Arg(arg) => {
        bail!("unsupported argument: {}", arg)
      }
      ArgKind::LongFlag(name) => {
        bail!("unsupported flag: --{}", name)
      }
      ArgKind::ShortFlag(name) => {
        bail!("unsupported flag: -{}", name)
      }
    }
  }
}

/// Splits arguments into flags and plain arguments. `-ab` is two short
/// flags and everything after `--` is a plain argument.
pub fn parse_arg_kinds(args: &[String]) -> Vec<ArgKind<'_>> {
  let mut result = Vec::new();
  let mut had_dash_dash = false;
  for arg in args {
    if had_dash_dash || arg == "-" {
      result.push(ArgKind::Arg(arg));
    } else if arg == "--" {
      had_dash_dash = true;
    } else if let Some(flag) = arg.strip_prefix("--") {
      result.push(ArgKind::LongFlag(flag));
    } else if let Some(flags) = arg.strip_prefix('-') {
      result.extend(flags.chars().map(ArgKind::ShortFlag));
    } else {
      result.push(ArgKind::Arg(arg));
    }
  }
  result
}

#[cfg(test)]
mod test {
  use super::*;
  use pretty_assertions::assert_eq;

  #[test]
  fn parses() {
    let data = ["-l", "-LP", "--long", "name", "-", "--", "--after", "-x"]
      .iter()
      .map(|arg| arg.to_string())
      .collect::<Vec<_>>();
    assert_eq!(
      parse_arg_kinds(&data),
      vec![
        ArgKind::ShortFlag('l'),
        ArgKind::ShortFlag('L'),
        ArgKind::ShortFlag('P'),
        ArgKind::LongFlag("long"),
        ArgKind::Arg("name"),
        ArgKind::Arg("-"),
        ArgKind::Arg("--after"),
        ArgKind::Arg("-x"),
      ]
    );
  }

  #[test]
  fn unsupported_messages() {
    assert_eq!(
      ArgKind::ShortFlag('z')
        .bail_unsupported()
        .err()
        .unwrap()
        .to_string(),
      "unsupported flag: -z"
    );
    assert_eq!(
      ArgKind::LongFlag("zz")
        .bail_unsupported()
        .err()
        .unwrap()
        .to_string(),
      "unsupported flag: --zz"
    );
    assert_eq!(
      ArgKind::Arg("x").bail_unsupported().err().unwrap().to_string(),
      "unsupported argument: x"
    );
  }
}
