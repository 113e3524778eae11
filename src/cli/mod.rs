//! Command Line Interface (CLI) layer for INUNDEX.
//!
//! This module defines argument parsing (`args`), error types (`errors`),
//! and the orchestration logic (`runner`) for the `run`, `preview` and `map`
//! commands. It wires user-provided options to the underlying library
//! functionality exposed via `inundex::api`.
//!
//! If you are embedding INUNDEX into another application, prefer using
//! the high-level `inundex::api` module instead of calling the CLI code.
pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
