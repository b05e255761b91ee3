#![allow(dead_code)]

use process_starter::plan::{CommandPlan, CommandSpec};

/// Builder for `CommandPlan` to simplify test setup.
#[derive(Debug, Default)]
pub struct CommandPlanBuilder {
    plan: CommandPlan,
}

impl CommandPlanBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pre(mut self, cmd: &str) -> Self {
        self.plan.pre.push(CommandSpec::new(cmd));
        self
    }

    pub fn run(mut self, cmd: &str) -> Self {
        self.plan.run.push(CommandSpec::new(cmd));
        self
    }

    pub fn post(mut self, cmd: &str) -> Self {
        self.plan.post.push(CommandSpec::new(cmd));
        self
    }

    pub fn build(self) -> CommandPlan {
        self.plan
    }
}
