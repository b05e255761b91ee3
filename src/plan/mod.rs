// src/plan/mod.rs

//! The three command groups a supervisor invocation works through.
//!
//! A [`CommandPlan`] is built once (from the CLI, optionally merged with a
//! config file) and is read-only for the whole lifecycle.

pub mod command;

pub use command::{CommandGroup, CommandSpec};

use crate::config::ConfigFile;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandPlan {
    pub pre: Vec<CommandSpec>,
    pub run: Vec<CommandSpec>,
    pub post: Vec<CommandSpec>,
}

impl CommandPlan {
    pub fn new(
        pre: impl IntoIterator<Item = impl Into<CommandSpec>>,
        run: impl IntoIterator<Item = impl Into<CommandSpec>>,
        post: impl IntoIterator<Item = impl Into<CommandSpec>>,
    ) -> Self {
        Self {
            pre: pre.into_iter().map(Into::into).collect(),
            run: run.into_iter().map(Into::into).collect(),
            post: post.into_iter().map(Into::into).collect(),
        }
    }

    /// Commands of one group, in list order.
    pub fn group(&self, group: CommandGroup) -> &[CommandSpec] {
        match group {
            CommandGroup::Pre => &self.pre,
            CommandGroup::Run => &self.run,
            CommandGroup::Post => &self.post,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pre.is_empty() && self.run.is_empty() && self.post.is_empty()
    }

    pub fn total(&self) -> usize {
        self.pre.len() + self.run.len() + self.post.len()
    }

    /// Merge commands from an optional config file with commands from the CLI.
    ///
    /// For every group the file's commands come first, followed by the CLI's.
    pub fn merge(file: Option<&ConfigFile>, cli: CommandPlan) -> Self {
        let Some(file) = file else {
            return cli;
        };

        let mut merged = file.commands.to_plan();
        merged.pre.extend(cli.pre);
        merged.run.extend(cli.run);
        merged.post.extend(cli.post);
        merged
    }
}
