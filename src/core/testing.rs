//! Test doubles shared by the unit tests of the navigation core.

use crate::core::command::{Command, CommandRef};
use crate::core::config::Config;
use crate::core::console::{ScriptedConsole, Transcript};
use crate::core::context::{AppContext, UiContext};
use crate::core::dirs::DataPaths;
use crate::core::game::GameManager;
use crate::core::speech::TtsManager;
use crate::core::state::{State, StateRef, Step};
use std::cell::RefCell;
use std::rc::Rc;

/// Minimal state that records every line it handles and stays put
pub(crate) struct FakeState {
    name: &'static str,
    requires_input: bool,
    commands: &'static [&'static str],
    inputs: Rc<RefCell<Vec<String>>>,
}

impl FakeState {
    fn build(name: &'static str, requires_input: bool, commands: &'static [&'static str]) -> Self {
        Self {
            name,
            requires_input,
            commands,
            inputs: Rc::default(),
        }
    }

    pub(crate) fn interactive(name: &'static str) -> StateRef {
        Rc::new(Self::build(name, true, &[]))
    }

    pub(crate) fn transient(name: &'static str) -> StateRef {
        Rc::new(Self::build(name, false, &[]))
    }

    pub(crate) fn with_commands(name: &'static str, commands: &'static [&'static str]) -> StateRef {
        Rc::new(Self::build(name, true, commands))
    }

    pub(crate) fn recording(name: &'static str) -> (StateRef, Rc<RefCell<Vec<String>>>) {
        let fake = Self::build(name, true, &[]);
        let inputs = fake.inputs.clone();
        (Rc::new(fake), inputs)
    }
}

impl State for FakeState {
    fn name(&self) -> &str {
        self.name
    }

    fn requires_input(&self) -> bool {
        self.requires_input
    }

    fn local_commands(&self) -> Vec<CommandRef> {
        self.commands
            .iter()
            .map(|name| Rc::new(Stub(*name)) as CommandRef)
            .collect()
    }

    fn handle(&self, _: &mut AppContext, _: &mut UiContext, input: &str) -> Step {
        self.inputs.borrow_mut().push(input.to_string());
        Step::stay()
    }
}

struct Stub(&'static str);

impl Command for Stub {
    fn name(&self) -> &str {
        self.0
    }

    fn execute(&self, _: &mut AppContext, _: &mut UiContext, _: &[String]) -> Step {
        Step::stay()
    }
}

/// Contexts wired to a scripted console, silent speech and an empty catalog
pub(crate) fn contexts(inputs: &[&str]) -> (AppContext, UiContext, Transcript) {
    let console = ScriptedConsole::new(inputs.iter().copied());
    let transcript = console.transcript();
    let ui = UiContext::new(Box::new(console), TtsManager::silent());
    let paths = DataPaths::at(std::env::temp_dir().join("toby-launcher-unit-tests"));
    let app = AppContext::new(Config::default(), GameManager::new(paths, Vec::new()));
    (app, ui, transcript)
}
