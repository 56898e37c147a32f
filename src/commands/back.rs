use crate::core::command::Command;
use crate::core::context::{AppContext, UiContext};
use crate::core::state::Step;

/// Local command of sub-menus and input prompts
pub struct BackCommand;

impl Command for BackCommand {
    fn name(&self) -> &str {
        "back"
    }

    fn description(&self) -> &str {
        "Returns to the previous step."
    }

    fn execute(&self, app: &mut AppContext, _ui: &mut UiContext, _args: &[String]) -> Step {
        app.previous_state().into()
    }
}
