use crate::core::command::Command;
use crate::core::context::{AppContext, UiContext};
use crate::core::state::Step;

pub struct ConfirmCommand;

impl Command for ConfirmCommand {
    fn name(&self) -> &str {
        "confirm"
    }

    fn description(&self) -> &str {
        "Confirms the specified action."
    }

    fn aliases(&self) -> &[&str] {
        &["yes"]
    }

    fn execute(&self, app: &mut AppContext, ui: &mut UiContext, _args: &[String]) -> Step {
        let state = match app.current_state() {
            Ok(state) => state,
            Err(e) => return Step::rejected(e),
        };
        match state.confirmation_target() {
            Some(target) => Step::to(target),
            None => {
                ui.display("Incorrect confirmation dialog!\n");
                app.previous_state().into()
            }
        }
    }
}

pub struct CancelCommand;

impl Command for CancelCommand {
    fn name(&self) -> &str {
        "cancel"
    }

    fn description(&self) -> &str {
        "Cancels the specified action."
    }

    fn aliases(&self) -> &[&str] {
        &["no"]
    }

    fn execute(&self, app: &mut AppContext, _ui: &mut UiContext, _args: &[String]) -> Step {
        app.previous_state().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::{contexts, FakeState};

    #[test]
    fn test_confirm_outside_dialog() {
        let (mut app, mut ui, transcript) = contexts(&[]);
        let root = FakeState::interactive("root");
        app.goto(root.clone(), &mut ui);
        app.goto(FakeState::interactive("menu"), &mut ui);

        let step = ConfirmCommand.execute(&mut app, &mut ui, &["yes".to_string()]);
        assert!(step.leads_to(&root));
        assert!(transcript.contains("Incorrect confirmation dialog!"));
    }

    #[test]
    fn test_cancel_rewinds() {
        let (mut app, mut ui, _) = contexts(&[]);
        let root = FakeState::interactive("root");
        app.goto(root.clone(), &mut ui);
        app.goto(FakeState::interactive("dialog"), &mut ui);
        let step = CancelCommand.execute(&mut app, &mut ui, &["no".to_string()]);
        assert!(step.leads_to(&root));
    }
}
