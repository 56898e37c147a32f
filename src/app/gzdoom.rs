use crate::app::back_only;
use crate::core::command::CommandRef;
use crate::core::config::VideoBackend;
use crate::core::context::{AppContext, UiContext};
use crate::core::menu::{MenuOption, MenuState};
use crate::core::state::{State, Step};
use crate::core::templates::TemplateParams;
use crate::core::toggle::{toggle_option, ConfigFlag};
use std::rc::Rc;

pub fn gzdoom_settings_menu() -> MenuState {
    MenuState::new(
        "gzdoom settings menu",
        vec![
            MenuOption::back(0),
            MenuOption::new(1, "Change additional GZDoom launch parameters.", |_, _| {
                Step::to(Rc::new(LaunchParamsState))
            }),
            MenuOption::new(2, "Change video backend ({backend}).", |_, _| {
                Step::to(Rc::new(video_backend_menu()))
            })
            .with_params(|app| TemplateParams::new().with("backend", app.config.gzdoom.video_backend)),
            toggle_option(
                3,
                "music",
                ConfigFlag::new(|c| &c.gzdoom.music, |c| &mut c.gzdoom.music),
            ),
            toggle_option(
                4,
                "sound effects",
                ConfigFlag::new(|c| &c.gzdoom.sound_fx, |c| &mut c.gzdoom.sound_fx),
            ),
            toggle_option(
                5,
                "debug output",
                ConfigFlag::new(|c| &c.gzdoom.debug_output, |c| &mut c.gzdoom.debug_output),
            ),
            toggle_option(
                6,
                "logging",
                ConfigFlag::new(|c| &c.gzdoom.logging, |c| &mut c.gzdoom.logging),
            ),
        ],
    )
    .with_commands(back_only())
}

pub fn video_backend_menu() -> MenuState {
    let mut options = vec![MenuOption::back(0)];
    for (id, backend) in (1..).zip(VideoBackend::ALL) {
        options.push(MenuOption::new(id, format!("{backend}."), move |_, _| {
            Step::to(Rc::new(SelectVideoBackendState { backend }))
        }));
    }
    MenuState::new("video backend menu", options).with_commands(back_only())
}

/// Applies a backend and returns past the backend menu to the settings
pub struct SelectVideoBackendState {
    backend: VideoBackend,
}

impl State for SelectVideoBackendState {
    fn name(&self) -> &str {
        "select video backend"
    }

    fn requires_input(&self) -> bool {
        false
    }

    fn handle(&self, app: &mut AppContext, ui: &mut UiContext, _input: &str) -> Step {
        app.config.gzdoom.video_backend = self.backend;
        ui.display(&format!("You have selected video backend: {}.\n", self.backend));
        app.rewind(2).into()
    }
}

/// Prompt for extra GZDoom arguments, separated by semicolons
#[derive(Debug, Default)]
pub struct LaunchParamsState;

impl State for LaunchParamsState {
    fn name(&self) -> &str {
        "change launch params"
    }

    fn description(&self) -> &str {
        "You need to specify the parameters that will be passed to GZDoom when starting any game. The separator between the parameters is a semicolon. To reset the parameters, press \"enter\"."
    }

    fn local_commands(&self) -> Vec<CommandRef> {
        back_only()
    }

    fn display(&self, app: &AppContext, ui: &mut UiContext) {
        let mut text =
            String::from("Enter the desired GZDoom launch parameters, separating them with semicolons.\n");
        let current = &app.config.gzdoom.additional_params;
        if !current.is_empty() {
            text.push_str(&format!("Current value: {}\n", current.join("; ")));
        }
        ui.display(&text);
    }

    fn handle(&self, app: &mut AppContext, ui: &mut UiContext, input: &str) -> Step {
        if input.is_empty() {
            app.config.gzdoom.additional_params.clear();
            ui.display("Launch parameters have been reset.\n");
            return app.previous_state().into();
        }

        let params: Vec<String> = input
            .split(';')
            .map(str::trim)
            .filter(|param| !param.is_empty())
            .map(str::to_string)
            .collect();
        if params.is_empty() {
            ui.display("Launch parameters remain unchanged.\n");
        } else {
            ui.display(&format!(
                "The following launch parameters are set: {}.\n",
                params.join("; ")
            ));
            app.config.gzdoom.additional_params = params;
        }
        app.previous_state().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::StateRef;
    use crate::core::testing::{contexts, FakeState};

    #[test]
    fn test_gzdoom_menu_text() {
        let (mut app, mut ui, transcript) = contexts(&[]);
        app.config.gzdoom.logging = true;
        gzdoom_settings_menu().display(&app, &mut ui);
        assert_eq!(
            transcript.text(),
            "0. Back.\n\
             1. Change additional GZDoom launch parameters.\n\
             2. Change video backend (OpenGL).\n\
             3. disable music.\n\
             4. disable sound effects.\n\
             5. enable debug output.\n\
             6. disable logging.\n\
             Make your choice.\n"
        );
    }

    #[test]
    fn test_backend_selection_rewinds_two_levels() {
        let (mut app, mut ui, transcript) = contexts(&[]);
        let settings = FakeState::interactive("gzdoom settings menu");
        app.goto(FakeState::interactive("main menu"), &mut ui);
        app.goto(settings.clone(), &mut ui);
        let backends: StateRef = Rc::new(video_backend_menu());
        app.goto(backends.clone(), &mut ui);

        let select = backends.handle(&mut app, &mut ui, "2").next.unwrap();
        app.goto(select.clone(), &mut ui);
        let step = select.handle(&mut app, &mut ui, "");

        assert!(step.leads_to(&settings));
        assert_eq!(app.config.gzdoom.video_backend, VideoBackend::Vulkan);
        assert!(transcript.contains("You have selected video backend: Vulkan.\n"));
        assert_eq!(app.stack.names(), vec!["main menu"]);
    }

    fn params_prompt(app: &mut AppContext, ui: &mut UiContext) -> (StateRef, StateRef) {
        let menu = FakeState::interactive("gzdoom settings menu");
        let prompt: StateRef = Rc::new(LaunchParamsState);
        app.goto(menu.clone(), ui);
        app.goto(prompt.clone(), ui);
        (menu, prompt)
    }

    #[test]
    fn test_launch_params_split_on_semicolons() {
        let (mut app, mut ui, transcript) = contexts(&[]);
        let (menu, prompt) = params_prompt(&mut app, &mut ui);
        let step = prompt.handle(&mut app, &mut ui, "+fov 100; ;-skill 4 ");
        assert!(step.leads_to(&menu));
        assert_eq!(app.config.gzdoom.additional_params, vec!["+fov 100", "-skill 4"]);
        assert!(transcript.contains("The following launch parameters are set: +fov 100; -skill 4.\n"));
    }

    #[test]
    fn test_launch_params_reset_and_unchanged() {
        let (mut app, mut ui, transcript) = contexts(&[]);
        app.config.gzdoom.additional_params = vec!["-nomonsters".to_string()];

        let (_, prompt) = params_prompt(&mut app, &mut ui);
        prompt.handle(&mut app, &mut ui, " ; ");
        assert_eq!(app.config.gzdoom.additional_params, vec!["-nomonsters"]);
        assert!(transcript.contains("Launch parameters remain unchanged.\n"));

        let (_, prompt) = params_prompt(&mut app, &mut ui);
        prompt.handle(&mut app, &mut ui, "");
        assert!(app.config.gzdoom.additional_params.is_empty());
        assert!(transcript.contains("Launch parameters have been reset.\n"));
    }
}
