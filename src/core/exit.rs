use crate::core::context::{AppContext, UiContext};
use crate::core::state::{State, Step};

pub const FAREWELL: &str = "Good bye!";

/// Terminal state: says good bye and stops the interaction loop
#[derive(Debug, Default)]
pub struct ExitState;

impl State for ExitState {
    fn name(&self) -> &str {
        "exit"
    }

    fn requires_input(&self) -> bool {
        false
    }

    fn display(&self, _app: &AppContext, ui: &mut UiContext) {
        ui.speak(FAREWELL);
        ui.display(&format!("{FAREWELL}\n"));
    }

    fn handle(&self, app: &mut AppContext, _ui: &mut UiContext, _input: &str) -> Step {
        app.running = false;
        Step::stay()
    }
}
