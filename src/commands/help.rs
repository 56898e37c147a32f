use crate::core::command::{Command, CommandRef};
use crate::core::context::{AppContext, UiContext};
use crate::core::state::Step;

/// Describes the current state and lists every available command
pub struct HelpCommand;

impl Command for HelpCommand {
    fn name(&self) -> &str {
        "help"
    }

    fn description(&self) -> &str {
        "Displays help information."
    }

    fn aliases(&self) -> &[&str] {
        &["?", "info"]
    }

    fn execute(&self, app: &mut AppContext, ui: &mut UiContext, _args: &[String]) -> Step {
        let state = match app.current_state() {
            Ok(state) => state,
            Err(e) => return Step::rejected(e),
        };

        let mut text = String::new();
        let description = state.description();
        if description.is_empty() {
            text.push_str("Help for this state not found.\n");
        } else {
            text.push_str(description);
            text.push('\n');
        }
        text.push_str("The following commands are available to you:\n");
        for cmd in ui.registry.local_commands().iter().chain(ui.registry.global_commands()) {
            text.push_str(&describe(cmd));
        }
        ui.display(&text);
        Step::stay()
    }
}

fn describe(cmd: &CommandRef) -> String {
    format!(
        "{}: ({}).\n{}\n",
        cmd.name(),
        cmd.aliases().join(", "),
        cmd.description()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{default_global_commands, BackCommand};
    use crate::core::testing::{contexts, FakeState};
    use std::rc::Rc;

    #[test]
    fn test_help_lists_local_commands_first() {
        let (mut app, mut ui, transcript) = contexts(&[]);
        ui.registry.register_global_commands(default_global_commands());
        app.goto(FakeState::interactive("menu"), &mut ui);
        ui.registry.register_local_commands(vec![Rc::new(BackCommand)]);

        let step = app.dispatch(&mut ui, "?");
        assert!(step.next.is_none());

        let text = transcript.text();
        assert!(text.starts_with("The description for this state is not defined.\n"));
        assert!(text.contains("back: ().\nReturns to the previous step.\n"));
        assert!(text.contains("help: (?, info).\nDisplays help information.\n"));
        assert!(text.contains("quit: (exit, terminate).\n"));
        assert!(text.find("back:") < text.find("help:"));
    }

    #[test]
    fn test_help_without_state() {
        let (mut app, mut ui, _) = contexts(&[]);
        let step = HelpCommand.execute(&mut app, &mut ui, &["help".to_string()]);
        assert!(step.error.is_some_and(|e| e.is_navigation()));
    }
}
