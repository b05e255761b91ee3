// src/plan/command.rs

use std::fmt;

/// One shell invocation, e.g. `"npm run watch"`.
///
/// The string is never parsed here; it is handed verbatim to the shell.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommandSpec(String);

impl CommandSpec {
    pub fn new(cmd: impl Into<String>) -> Self {
        Self(cmd.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CommandSpec {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for CommandSpec {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Which group a command belongs to.
///
/// Pre and post commands run one at a time in list order; run commands run
/// concurrently with no ordering between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandGroup {
    Pre,
    Run,
    Post,
}

impl fmt::Display for CommandGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandGroup::Pre => f.write_str("pre"),
            CommandGroup::Run => f.write_str("run"),
            CommandGroup::Post => f.write_str("post"),
        }
    }
}
