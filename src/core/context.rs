//! Application and UI contexts, and the navigation controller.
//!
//! [`AppContext`] owns the state stack, the configuration and the game
//! manager; it implements the transition protocol ([`AppContext::goto`]), the
//! rewind accessors and input dispatch. [`UiContext`] owns everything that
//! talks to the user: the console, the error presenter, the command registry
//! and the speech manager.
//!
//! # Transition protocol
//! 1. Push the next state.
//! 2. Call its `init`.
//!    - Same state back: register its local commands.
//!    - Different state back: drop the pushed state, push the redirect
//!      without calling its `init`, register the redirect's local commands.
//!    - Navigation error with no state: drop the pushed state and report.

use crate::core::config::Config;
use crate::core::console::Console;
use crate::core::command_registry::CommandRegistry;
use crate::core::error::{ErrorPresenter, LauncherError, Result, StdErrorPresenter};
use crate::core::game::GameManager;
use crate::core::output::{wrap_text, DEFAULT_WRAP_WIDTH};
use crate::core::speech::TtsManager;
use crate::core::state::{StateRef, Step};
use crate::core::state_stack::StateStack;
use std::rc::Rc;

/// Navigation state and application data
pub struct AppContext {
    pub config: Config,
    pub stack: StateStack,
    pub games: GameManager,
    pub running: bool,
}

impl AppContext {
    pub fn new(config: Config, games: GameManager) -> Self {
        Self {
            config,
            stack: StateStack::new(),
            games,
            running: true,
        }
    }

    pub fn current_state(&self) -> Result<StateRef> {
        self.stack.peek().cloned().ok_or(LauncherError::StackEmpty)
    }

    /// The interactive state below the current one (`rewind(1)`)
    pub fn previous_state(&mut self) -> Result<StateRef> {
        self.rewind(1)
    }

    /// Unwind `depth` interactive levels; see [`StateStack::rewind`]
    pub fn rewind(&mut self, depth: usize) -> Result<StateRef> {
        let result = self.stack.rewind(depth);
        match &result {
            Ok(state) => log::debug!("Rewound {depth} level(s) to '{}'", state.name()),
            Err(e) => log::warn!("Rewind of {depth} level(s) failed: {e}"),
        }
        result
    }

    /// Enter `next` following the transition protocol
    ///
    /// Returns the state that is current afterwards together with any error
    /// raised by `init`.
    pub fn goto(&mut self, next: StateRef, ui: &mut UiContext) -> (StateRef, Option<LauncherError>) {
        log::debug!("Entering state '{}'", next.name());
        self.stack.push(next.clone());
        let Step { next: redirect, error } = next.init(self, ui);

        if let Some(redirect) = redirect.filter(|r| !Rc::ptr_eq(r, &next)) {
            self.remove_if_current(&next);
            log::debug!("State '{}' redirected to '{}'", next.name(), redirect.name());
            self.stack.push(redirect.clone());
            ui.registry.register_local_commands(redirect.local_commands());
            return (redirect, error);
        }

        if error.as_ref().is_some_and(LauncherError::is_navigation) {
            self.remove_if_current(&next);
            return (next, error);
        }

        ui.registry.register_local_commands(next.local_commands());
        (next, error)
    }

    /// Route a line to a command, or to the current state when none matches
    pub fn dispatch(&mut self, ui: &mut UiContext, input: &str) -> Step {
        let input = input.trim();
        if let Some((cmd, args)) = ui.registry.parse_input(input) {
            log::debug!("Executing command '{}' with {:?}", cmd.name(), &args[1..]);
            return cmd.execute(self, ui, &args);
        }
        match self.current_state() {
            Ok(state) => state.handle(self, ui, input),
            Err(e) => Step::rejected(e),
        }
    }

    fn remove_if_current(&mut self, state: &StateRef) {
        if self.stack.peek().is_some_and(|top| Rc::ptr_eq(top, state)) {
            self.stack.pop();
        }
    }
}

/// Everything that talks to the user
pub struct UiContext {
    pub console: Box<dyn Console>,
    pub presenter: Box<dyn ErrorPresenter>,
    pub registry: CommandRegistry,
    pub tts: TtsManager,
    pub wrap_width: usize,
}

impl UiContext {
    pub fn new(console: Box<dyn Console>, tts: TtsManager) -> Self {
        Self {
            console,
            presenter: Box::new(StdErrorPresenter),
            registry: CommandRegistry::new(),
            tts,
            wrap_width: DEFAULT_WRAP_WIDTH,
        }
    }

    pub fn with_wrap_width(mut self, width: usize) -> Self {
        self.wrap_width = width;
        self
    }

    /// Write wrapped text to the console
    pub fn display(&mut self, text: &str) {
        let wrapped = wrap_text(text, self.wrap_width);
        if let Err(e) = self.console.write(&wrapped) {
            log::error!("{}", self.presenter.render(&e));
        }
    }

    /// Render an error and display it, unless it renders to nothing
    pub fn display_error(&mut self, error: &LauncherError) {
        let message = self.presenter.render(error);
        if !message.is_empty() {
            log::debug!("Displaying error: {message}");
            self.display(&format!("{message}\n"));
        }
    }

    pub fn read_line(&mut self) -> Result<String> {
        self.console.read_line()
    }

    /// Speak `text`; a failing synthesizer is reported on the console
    pub fn speak(&mut self, text: &str) {
        if let Err(e) = self.tts.speak(text) {
            log::error!("Speaking failed: {e}");
            self.display_error(&e);
        }
    }
}
