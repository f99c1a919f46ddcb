// brewup-core/src/testing.rs
//! Scripted `CommandRunner` for unit tests.
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;

use brewup_common::error::Result;

use crate::process::{CommandOutput, CommandRunner, CommandSpec};

/// Answers commands from a script keyed by the full command line and records
/// every call. Unscripted commands succeed with empty output. A command
/// scripted several times answers in order, then repeats its last answer.
#[derive(Default)]
pub struct ScriptedRunner {
    responses: Mutex<HashMap<String, VecDeque<CommandOutput>>>,
    on_path: HashSet<String>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, command_line: &str, output: CommandOutput) -> Self {
        self.responses
            .lock()
            .unwrap()
            .entry(command_line.to_string())
            .or_default()
            .push_back(output);
        self
    }

    pub fn with_on_path(mut self, program: &str) -> Self {
        self.on_path.insert(program.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, command_line: &str) -> usize {
        self.calls().iter().filter(|c| *c == command_line).count()
    }

    fn answer(&self, spec: &CommandSpec) -> CommandOutput {
        let line = spec.to_string();
        self.calls.lock().unwrap().push(line.clone());
        let mut responses = self.responses.lock().unwrap();
        match responses.get_mut(&line) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap_or_default(),
            Some(queue) => queue.front().cloned().unwrap_or_else(CommandOutput::success),
            None => CommandOutput::success(),
        }
    }
}

impl CommandRunner for ScriptedRunner {
    async fn capture(&self, spec: &CommandSpec) -> Result<CommandOutput> {
        Ok(self.answer(spec))
    }

    async fn stream(&self, spec: &CommandSpec) -> Result<CommandOutput> {
        Ok(self.answer(spec))
    }

    fn resolves_on_path(&self, program: &str) -> bool {
        self.on_path.contains(program)
    }
}
