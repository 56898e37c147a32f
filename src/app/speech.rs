use crate::app::back_only;
use crate::core::command::CommandRef;
use crate::core::config::MAX_SPEECH_RATE;
use crate::core::context::{AppContext, UiContext};
use crate::core::error::LauncherError;
use crate::core::input_parser::InputParser;
use crate::core::menu::{MenuOption, MenuState};
use crate::core::state::{State, Step};
use crate::core::templates::TemplateParams;
use std::rc::Rc;

pub fn speech_settings_menu() -> MenuState {
    MenuState::new(
        "speech settings menu",
        vec![
            MenuOption::back(0),
            MenuOption::new(1, "Change speech synthesizer ({synthesizer}).", |_, ui| {
                Step::to(Rc::new(synthesizer_menu(ui.tts.available_names())))
            })
            .with_params(|app| TemplateParams::new().with("synthesizer", &app.config.tts.speech_engine)),
            MenuOption::new(2, "Change speech rate ({rate}).", |_, _| {
                Step::to(Rc::new(SpeechRateState))
            })
            .with_params(|app| TemplateParams::new().with("rate", app.config.tts.rate)),
        ],
    )
    .with_commands(back_only())
}

/// One entry per synthesizer; choosing one applies it and stays in the menu
pub fn synthesizer_menu(names: Vec<String>) -> MenuState {
    let mut options = vec![MenuOption::back(0)];
    for (id, name) in (1..).zip(names) {
        options.push(MenuOption::new(id, format!("{name}."), move |app, ui| {
            if let Err(e) = ui.tts.set_synthesizer(&name) {
                return Step::rejected(e);
            }
            app.config.tts.speech_engine = name.clone();
            let message = format!("{name} selected.");
            ui.display(&format!("{message}\n"));
            ui.speak(&message);
            Step::stay()
        }));
    }
    MenuState::new("list synthesizers menu", options).with_commands(back_only())
}

/// Prompt for the speech rate in words per minute
///
/// Empty input keeps the current rate.
#[derive(Debug, Default)]
pub struct SpeechRateState;

impl State for SpeechRateState {
    fn name(&self) -> &str {
        "select speech rate"
    }

    fn description(&self) -> &str {
        "You need to enter the number of words that corresponds to your desired speech speed in words per minute."
    }

    fn local_commands(&self) -> Vec<CommandRef> {
        back_only()
    }

    fn display(&self, app: &AppContext, ui: &mut UiContext) {
        let mut text = String::from("Enter your desired speech rate.\n");
        if app.config.tts.rate > 0 {
            text.push_str(&format!("Current value: {}.\n", app.config.tts.rate));
        }
        ui.display(&text);
    }

    fn handle(&self, app: &mut AppContext, ui: &mut UiContext, input: &str) -> Step {
        let requested = match InputParser::parse_optional_int_in_range(
            input,
            i64::from(app.config.tts.rate),
            0,
            i64::from(MAX_SPEECH_RATE),
        )
        .and_then(|rate| u32::try_from(rate).map_err(|_| LauncherError::OutOfBounds))
        {
            Ok(rate) => rate,
            Err(e) => return Step::rejected(e),
        };

        match ui.tts.set_rate(requested) {
            Ok(rate) => {
                app.config.tts.rate = rate;
                let message = format!("You have selected speech rate: {rate}.");
                ui.display(&format!("{message}\n"));
                ui.speak(&message);
            }
            Err(e) => ui.display_error(&e),
        }
        app.previous_state().into()
    }
}
