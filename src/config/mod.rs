// src/config/mod.rs

//! Optional TOML command file.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk (`loader.rs`).
//! - Reject blank commands and a blank shell (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path};
pub use model::{CommandsSection, ConfigFile, ConfigSection, RawConfigFile};
