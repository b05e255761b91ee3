// src/config/model.rs

use serde::Deserialize;

use crate::plan::CommandPlan;
use crate::types::FailurePolicy;

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [config]
/// on_failure = "continue"
/// shell = "bash"
///
/// [commands]
/// pre = ["make build"]
/// run = ["npm run watch", "cargo run"]
/// post = ["docker compose down"]
/// ```
///
/// All sections are optional. This is the unvalidated form; use
/// [`ConfigFile::try_from`] (or [`crate::config::load_and_validate`]) to get
/// a checked [`ConfigFile`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfigFile {
    #[serde(default)]
    pub config: ConfigSection,

    #[serde(default)]
    pub commands: CommandsSection,
}

/// `[config]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigSection {
    /// `"continue"` (default) or `"abort"`.
    #[serde(default)]
    pub on_failure: FailurePolicy,

    /// Shell program used as `<shell> -c <cmd>`. `None` means the platform
    /// default (`sh` / `cmd`).
    #[serde(default)]
    pub shell: Option<String>,
}

/// `[commands]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommandsSection {
    #[serde(default)]
    pub pre: Vec<String>,

    #[serde(default)]
    pub run: Vec<String>,

    #[serde(default)]
    pub post: Vec<String>,
}

impl CommandsSection {
    pub fn to_plan(&self) -> CommandPlan {
        CommandPlan::new(
            self.pre.iter().map(String::as_str),
            self.run.iter().map(String::as_str),
            self.post.iter().map(String::as_str),
        )
    }
}

/// Validated configuration.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub config: ConfigSection,
    pub commands: CommandsSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(config: ConfigSection, commands: CommandsSection) -> Self {
        Self { config, commands }
    }
}
