use crate::commands::{CancelCommand, ConfirmCommand};
use crate::core::command::CommandRef;
use crate::core::context::{AppContext, UiContext};
use crate::core::state::{State, StateRef, Step};
use std::rc::Rc;

pub const DEFAULT_MESSAGE: &str = "Are you sure?";

/// Asks the user to confirm a pending transition to `target`
///
/// Only the `confirm` and `cancel` commands leave the dialog.
pub struct ConfirmationDialog {
    message: String,
    target: StateRef,
}

impl ConfirmationDialog {
    pub fn new(target: StateRef) -> Self {
        Self {
            message: DEFAULT_MESSAGE.to_string(),
            target,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

impl State for ConfirmationDialog {
    fn name(&self) -> &str {
        "confirmation dialog"
    }

    fn description(&self) -> &str {
        "You are in a confirmation dialog for your last action. You need to confirm or cancel it."
    }

    fn local_commands(&self) -> Vec<CommandRef> {
        vec![Rc::new(ConfirmCommand), Rc::new(CancelCommand)]
    }

    fn display(&self, _app: &AppContext, ui: &mut UiContext) {
        ui.display(&format!("{}\n", self.message));
    }

    fn handle(&self, _app: &mut AppContext, ui: &mut UiContext, _input: &str) -> Step {
        ui.display("You need to confirm or cancel your choice (yes/no).\n");
        Step::stay()
    }

    fn confirmation_target(&self) -> Option<StateRef> {
        Some(self.target.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::{contexts, FakeState};

    fn open_dialog(app: &mut AppContext, ui: &mut UiContext) -> (StateRef, StateRef, StateRef) {
        let menu = FakeState::interactive("menu");
        let target = FakeState::interactive("target");
        let dialog: StateRef = Rc::new(ConfirmationDialog::new(target.clone()));
        app.goto(menu.clone(), ui);
        app.goto(dialog.clone(), ui);
        (menu, target, dialog)
    }

    #[test]
    fn test_yes_leads_to_target() {
        let (mut app, mut ui, _) = contexts(&[]);
        let (_, target, _) = open_dialog(&mut app, &mut ui);
        assert!(app.dispatch(&mut ui, "yes").leads_to(&target));
    }

    #[test]
    fn test_no_returns_below_dialog() {
        let (mut app, mut ui, _) = contexts(&[]);
        let (menu, _, _) = open_dialog(&mut app, &mut ui);
        assert!(app.dispatch(&mut ui, "no").leads_to(&menu));
    }

    #[test]
    fn test_other_input_reprompts() {
        let (mut app, mut ui, transcript) = contexts(&[]);
        let (_, _, dialog) = open_dialog(&mut app, &mut ui);
        dialog.display(&app, &mut ui);

        let step = app.dispatch(&mut ui, "maybe");
        assert!(step.next.is_none());
        assert!(step.error.is_none());
        assert_eq!(
            transcript.text(),
            "Are you sure?\nYou need to confirm or cancel your choice (yes/no).\n"
        );
    }

    #[test]
    fn test_custom_message() {
        let (app, mut ui, transcript) = contexts(&[]);
        let dialog = ConfirmationDialog::new(FakeState::interactive("exit")).with_message("Really?");
        dialog.display(&app, &mut ui);
        assert_eq!(transcript.text(), "Really?\n");
    }
}
