// Copyright 2018-2024 the Deno authors. MIT license.

use anyhow::Result;
use anyhow::bail;
use monch::*;

// A command line is a flat list of tokens separated by spaces, tabs or
// newlines. There is no quoting, so every token is taken literally.

#[cfg_attr(feature = "serialization", derive(serde::Serialize))]
#[cfg_attr(feature = "serialization", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedCommand {
  /// `cmd_name <args...>`
  pub args: Vec<String>,
  /// `cmd &`
  pub background: bool,
  /// `< file` and `> file`, in the order they appeared.
  pub redirects: Vec<Redirect>,
}

impl ParsedCommand {
  /// The program or built-in to run, if the line names one.
  pub fn command_name(&self) -> Option<&str> {
    self.args.first().map(|arg| arg.as_str())
  }

  /// The file standard input is read from, if redirected.
  pub fn input_path(&self) -> Option<&str> {
    self.last_redirect(RedirectOp::Input)
  }

  /// The file standard output is written to, if redirected.
  pub fn output_path(&self) -> Option<&str> {
    self.last_redirect(RedirectOp::Output)
  }

  /// Text used to describe the command in job listings.
  pub fn display_text(&self) -> String {
    self.args.join(" ")
  }

  fn last_redirect(&self, op: RedirectOp) -> Option<&str> {
    self
      .redirects
      .iter()
      .rev()
      .find(|redirect| redirect.op == op)
      .map(|redirect| redirect.path.as_str())
  }
}

#[cfg_attr(feature = "serialization", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
  pub op: RedirectOp,
  pub path: String,
}

#[cfg_attr(feature = "serialization", derive(serde::Serialize))]
#[cfg_attr(feature = "serialization", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectOp {
  /// <
  Input,
  /// >
  Output,
}

impl RedirectOp {
  pub fn as_str(&self) -> &'static str {
    match self {
      RedirectOp::Input => "<",
      RedirectOp::Output => ">",
    }
  }
}

enum CommandItem<'a> {
  Arg(&'a str),
  Background,
  Redirect(Redirect),
}

fn error_for_failure(e: ParseErrorFailure) -> Result<Option<ParsedCommand>> {
  bail!(
    "{}\n  {}\n  ~",
    e.message,
    // truncate the output to prevent wrapping in the console
    e.input.chars().take(60).collect::<String>()
  )
}

/// Parses an already expanded line.
///
/// Returns `Ok(None)` when the line has neither arguments nor redirects.
/// A line with only redirects still has its files opened.
pub fn parse(input: &str) -> Result<Option<ParsedCommand>> {
  match parse_command_items(input) {
    Ok((input, items)) => {
      if input.is_empty() {
        Ok(build_command(items))
      } else {
        error_for_failure(ParseErrorFailure::new(input, "Unexpected character."))
      }
    }
    Err(ParseError::Backtrace) => {
      error_for_failure(ParseErrorFailure::new(input, "Unexpected character."))
    }
    Err(ParseError::Failure(e)) => error_for_failure(e),
  }
}

fn build_command(items: Vec<CommandItem>) -> Option<ParsedCommand> {
  let mut command = ParsedCommand::default();
  for item in items {
    match item {
      CommandItem::Arg(arg) => command.args.push(arg.to_string()),
      CommandItem::Background => command.background = true,
      CommandItem::Redirect(redirect) => command.redirects.push(redirect),
    }
  }
  if command.args.is_empty() && command.redirects.is_empty() {
    None
  } else {
    Some(command)
  }
}

fn parse_command_items(input: &str) -> ParseResult<'_, Vec<CommandItem<'_>>> {
  preceded(
    skip_separators,
    many0(terminated(parse_command_item, skip_separators)),
  )(input)
}

fn parse_command_item(input: &str) -> ParseResult<'_, CommandItem<'_>> {
  or3(
    map(parse_redirect, CommandItem::Redirect),
    map(parse_token_with_text("&"), |_| CommandItem::Background),
    map(parse_token, CommandItem::Arg),
  )(input)
}

fn parse_redirect(input: &str) -> ParseResult<'_, Redirect> {
  let original_input = input;
  let (input, op) = or(
    map(parse_token_with_text(RedirectOp::Input.as_str()), |_| {
      RedirectOp::Input
    }),
    map(parse_token_with_text(RedirectOp::Output.as_str()), |_| {
      RedirectOp::Output
    }),
  )(input)?;
  let (input, _) = skip_separators(input)?;
  let message = match op {
    RedirectOp::Input => "Expected input file following '<'.",
    RedirectOp::Output => "Expected output file following '>'.",
  };
  let (input, path) =
    with_failure_input(original_input, assert_exists(parse_token, message))(
      input,
    )?;
  Ok((
    input,
    Redirect {
      op,
      path: path.to_string(),
    },
  ))
}

fn parse_token_with_text(
  text: &'static str,
) -> impl Fn(&str) -> ParseResult<'_, &str> {
  move |input| {
    let (input, token) = parse_token(input)?;
    if token == text {
      Ok((input, token))
    } else {
      ParseError::backtrace()
    }
  }
}

fn parse_token(input: &str) -> ParseResult<'_, &str> {
  let (input, token) = take_while(|c| !is_token_separator(c))(input)?;
  if token.is_empty() {
    ParseError::backtrace()
  } else {
    Ok((input, token))
  }
}

fn skip_separators(input: &str) -> ParseResult<'_, ()> {
  let (input, _) = take_while(is_token_separator)(input)?;
  Ok((input, ()))
}

fn is_token_separator(c: char) -> bool {
  matches!(c, ' ' | '\t' | '\n')
}
