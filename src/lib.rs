// Copyright 2018-2024 the Deno authors. MIT license.

//! A small interactive command interpreter: `$NAME` expansion, the `cd`,
//! `pwd`, `set`, `unset`, `jobs` and `wait` built-ins, `<`/`>` redirects
//! and `&` background jobs.

#![deny(clippy::print_stderr)]
#![deny(clippy::print_stdout)]
#![deny(clippy::unused_async)]

pub mod parser;

#[cfg(feature = "shell")]
mod shell;

#[cfg(feature = "shell")]
pub use shell::*;
