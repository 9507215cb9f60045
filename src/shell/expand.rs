// Copyright 2018-2025 the Deno authors. MIT license.

use monch::*;

use super::env_table::EnvTable;

#[derive(Debug, PartialEq)]
enum LinePart<'a> {
  Text(&'a str),
  /// `$NAME`, where the name may be empty.
  Variable(&'a str),
}

/// Replaces every `$NAME` in `input` with the variable's value.
///
/// The name is the longest run of `[A-Za-z0-9_]` following the `$`.
/// Variables that aren't set expand to nothing, as does a `$` that isn't
/// followed by a name. Values are inserted as is and not expanded again.
pub fn expand_vars(input: &str, vars: &EnvTable) -> String {
  let mut result = String::with_capacity(input.len());
  for part in parse_line_parts(input) {
    match part {
      LinePart::Text(text) => result.push_str(text),
      LinePart::Variable("") => {}
      LinePart::Variable(name) => {
        if let Some(value) = vars.get(name) {
          result.push_str(value);
        }
      }
    }
  }
  result
}

fn parse_line_parts(input: &str) -> Vec<LinePart<'_>> {
  match many0(or(
    map(parse_variable, LinePart::Variable),
    map(parse_text, LinePart::Text),
  ))(input)
  {
    Ok((_, parts)) => parts,
    // neither parser fails hard, and together they accept any input
    Err(_) => vec![LinePart::Text(input)],
  }
}

fn parse_variable(input: &str) -> ParseResult<'_, &str> {
  preceded(ch('$'), take_while(is_valid_env_var_char))(input)
}

fn parse_text(input: &str) -> ParseResult<'_, &str> {
  let (input, text) = take_while(|c| c != '$')(input)?;
  if text.is_empty() {
    ParseError::backtrace()
  } else {
    Ok((input, text))
  }
}

fn is_valid_env_var_char(c: char) -> bool {
  // [a-zA-Z0-9_]+
  c.is_ascii_alphanumeric() || c == '_'
}
