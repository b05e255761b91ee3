// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`backend`] defines the `CommandExecutor` trait every phase of the
//!   supervisor goes through, and the `CommandOutcome` it reports.
//! - [`shell`] provides `ShellExecutor`, which runs commands through
//!   `sh -c` (or `cmd /C`) with `tokio::process::Command`.

pub mod backend;
pub mod shell;

pub use backend::{CommandExecutor, CommandOutcome};
pub use shell::{Shell, ShellExecutor};
