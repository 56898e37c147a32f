use crate::core::command::Command;
use crate::core::confirmation::ConfirmationDialog;
use crate::core::context::{AppContext, UiContext};
use crate::core::exit::ExitState;
use crate::core::state::Step;
use std::rc::Rc;

pub const QUIT_QUESTION: &str = "Are you sure you want to immediately terminate the program?";

/// Leaves the program after confirmation, or at once with `quit force`
pub struct QuitCommand;

impl Command for QuitCommand {
    fn name(&self) -> &str {
        "quit"
    }

    fn description(&self) -> &str {
        "Immediately terminates the program."
    }

    fn aliases(&self) -> &[&str] {
        &["exit", "terminate"]
    }

    fn execute(&self, app: &mut AppContext, _ui: &mut UiContext, args: &[String]) -> Step {
        if args.get(1).is_some_and(|arg| arg.eq_ignore_ascii_case("force")) {
            return Step::to(Rc::new(ExitState));
        }
        // asking again from inside a dialog would stack dialogs
        if let Ok(state) = app.current_state() {
            if state.confirmation_target().is_some() {
                return Step::stay();
            }
        }
        Step::to(Rc::new(
            ConfirmationDialog::new(Rc::new(ExitState)).with_message(QUIT_QUESTION),
        ))
    }
}
