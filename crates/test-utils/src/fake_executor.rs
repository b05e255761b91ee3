use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use process_starter::exec::{CommandExecutor, CommandOutcome};
use process_starter::plan::CommandSpec;

/// How a scripted command behaves once started.
#[derive(Debug, Clone)]
pub enum Behaviour {
    /// Finish immediately with this outcome.
    Complete(CommandOutcome),
    /// Sleep, then finish with this outcome.
    After(Duration, CommandOutcome),
    /// Never finish.
    Hang,
    /// Panic inside the executor.
    Panic,
}

/// Start/finish notifications, in the order they happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Started(String),
    Finished(String),
}

/// A fake executor that:
/// - records when each command starts and finishes
/// - answers with a scripted outcome per command text (default: success)
///
/// Clones share the same event log, so a test can keep one clone and hand
/// the other to the supervisor.
#[derive(Debug, Clone, Default)]
pub struct ScriptedExecutor {
    script: HashMap<String, Behaviour>,
    events: Arc<Mutex<Vec<Event>>>,
}

impl ScriptedExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, cmd: &str, behaviour: Behaviour) -> Self {
        self.script.insert(cmd.to_string(), behaviour);
        self
    }

    pub fn failing(self, cmd: &str, code: i32) -> Self {
        self.with(cmd, Behaviour::Complete(CommandOutcome::Failed(code)))
    }

    pub fn delayed(self, cmd: &str, delay: Duration) -> Self {
        self.with(cmd, Behaviour::After(delay, CommandOutcome::Success))
    }

    pub fn hanging(self, cmd: &str) -> Self {
        self.with(cmd, Behaviour::Hang)
    }

    pub fn panicking(self, cmd: &str) -> Self {
        self.with(cmd, Behaviour::Panic)
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    /// Commands in the order they were started.
    pub fn started(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Started(cmd) => Some(cmd),
                Event::Finished(_) => None,
            })
            .collect()
    }

    /// Commands in the order they finished.
    pub fn finished(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Finished(cmd) => Some(cmd),
                Event::Started(_) => None,
            })
            .collect()
    }

    /// Position of an event in the log, if it happened.
    pub fn position(&self, event: &Event) -> Option<usize> {
        self.events().iter().position(|e| e == event)
    }

    fn push(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }
}

impl CommandExecutor for ScriptedExecutor {
    fn run<'a>(
        &'a self,
        cmd: &'a CommandSpec,
    ) -> Pin<Box<dyn Future<Output = CommandOutcome> + Send + 'a>> {
        Box::pin(async move {
            self.push(Event::Started(cmd.to_string()));

            let behaviour = self
                .script
                .get(cmd.as_str())
                .cloned()
                .unwrap_or(Behaviour::Complete(CommandOutcome::Success));

            let outcome = match behaviour {
                Behaviour::Complete(outcome) => outcome,
                Behaviour::After(delay, outcome) => {
                    tokio::time::sleep(delay).await;
                    outcome
                }
                Behaviour::Hang => std::future::pending().await,
                Behaviour::Panic => panic!("scripted executor panic on '{cmd}'"),
            };

            self.push(Event::Finished(cmd.to_string()));
            outcome
        })
    }
}
