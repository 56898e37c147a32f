use crate::app::games::GameSelectionState;
use crate::app::gzdoom::gzdoom_settings_menu;
use crate::app::speech::speech_settings_menu;
use crate::app::back_only;
use crate::commands::APP_NAME;
use crate::core::context::{AppContext, UiContext};
use crate::core::exit::ExitState;
use crate::core::menu::{MenuOption, MenuState};
use crate::core::state::{State, Step};
use std::rc::Rc;

/// Greets the user and opens the main menu
#[derive(Debug, Default)]
pub struct StartState;

impl State for StartState {
    fn name(&self) -> &str {
        "start"
    }

    fn requires_input(&self) -> bool {
        false
    }

    fn handle(&self, _app: &mut AppContext, ui: &mut UiContext, _input: &str) -> Step {
        ui.speak(&format!("Welcome to the {APP_NAME}!"));
        Step::to(Rc::new(main_menu()))
    }
}

pub fn main_menu() -> MenuState {
    MenuState::new(
        "main menu",
        vec![
            MenuOption::new(0, "Exit.", |_, _| Step::to(Rc::new(ExitState))),
            MenuOption::new(1, "Play.", |_, _| Step::to(Rc::new(GameSelectionState))),
            MenuOption::new(2, "Settings.", |_, _| Step::to(Rc::new(settings_menu()))),
        ],
    )
}

pub fn settings_menu() -> MenuState {
    MenuState::new(
        "settings",
        vec![
            MenuOption::back(0),
            MenuOption::new(1, "Speech settings.", |_, _| {
                Step::to(Rc::new(speech_settings_menu()))
            }),
            MenuOption::new(2, "GZDoom settings.", |_, _| {
                Step::to(Rc::new(gzdoom_settings_menu()))
            }),
        ],
    )
    .with_commands(back_only())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::contexts;

    #[test]
    fn test_main_menu_text() {
        let (app, mut ui, transcript) = contexts(&[]);
        main_menu().display(&app, &mut ui);
        assert_eq!(
            transcript.text(),
            "0. Exit.\n1. Play.\n2. Settings.\nMake your choice.\n"
        );
    }

    #[test]
    fn test_start_opens_main_menu() {
        let (mut app, mut ui, _) = contexts(&[]);
        let step = StartState.handle(&mut app, &mut ui, "");
        assert_eq!(step.next.unwrap().name(), "main menu");
    }

    #[test]
    fn test_settings_entries() {
        let (mut app, mut ui, _) = contexts(&[]);
        let settings = settings_menu();
        assert_eq!(settings.local_commands()[0].name(), "back");
        let step = settings.handle(&mut app, &mut ui, "2");
        assert_eq!(step.next.unwrap().name(), "gzdoom settings menu");
        let step = settings.handle(&mut app, &mut ui, "1");
        assert_eq!(step.next.unwrap().name(), "speech settings menu");
    }
}
