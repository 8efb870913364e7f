//! # CLI Layer
//!
//! This module is **one possible UI client** for codesync. It is the only
//! place that knows about terminal I/O, parses arguments, and initializes
//! logging.
//!
//! ## Structure
//!
//! - `setup`: clap argument definitions
//! - `commands`: context setup and per-command handlers (`run()` lives here)
//! - `print`: turns a `CmdResult` into terminal output
//!
//! Business logic is tested in the command layer. CLI tests under `tests/`
//! only drive the binary end to end.

mod commands;
mod print;
mod setup;

pub use commands::run;
