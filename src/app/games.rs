use crate::app::back_only;
use crate::core::command::CommandRef;
use crate::core::context::{AppContext, UiContext};
use crate::core::game::GameData;
use crate::core::input_parser::InputParser;
use crate::core::state::{State, Step};
use std::rc::Rc;
use std::time::Duration;

pub const GAME_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Lists the catalog; entry 0 goes back
#[derive(Debug, Default)]
pub struct GameSelectionState;

impl State for GameSelectionState {
    fn name(&self) -> &str {
        "game selection menu"
    }

    fn description(&self) -> &str {
        "You are in the game selection menu. You need to enter the number of the game you want to launch."
    }

    fn local_commands(&self) -> Vec<CommandRef> {
        back_only()
    }

    fn display(&self, app: &AppContext, ui: &mut UiContext) {
        let games = app.games.available_games();
        let mut text = String::from("0. Back.\n\nThe following games are available to you:\n\n");
        for (id, game) in (1..).zip(games) {
            text.push_str(&format!("{id}. {}.\n", game.name));
            if !game.description.is_empty() {
                text.push_str(&game.description);
                text.push('\n');
            }
            text.push('\n');
        }
        if games.is_empty() {
            text.push_str("No games are currently available.\n\n");
        }
        text.push_str("Make your choice.\n");
        ui.display(&text);
    }

    fn handle(&self, app: &mut AppContext, ui: &mut UiContext, input: &str) -> Step {
        let choice = match InputParser::parse_int(input) {
            Ok(choice) => choice,
            Err(e) => return Step::rejected(e),
        };
        if choice == 0 {
            return app.previous_state().into();
        }

        let game = usize::try_from(choice - 1)
            .ok()
            .and_then(|index| app.games.available_games().get(index))
            .cloned();
        match game {
            Some(game) => {
                ui.display(&format!("You have chosen a game: {}.\n", game.name));
                Step::to(Rc::new(LaunchGameState { game }))
            }
            None => {
                ui.display("There is no such item in the menu.\n");
                Step::stay()
            }
        }
    }
}

/// Starts GZDoom for the chosen game
pub struct LaunchGameState {
    game: GameData,
}

impl LaunchGameState {
    pub fn new(game: GameData) -> Self {
        Self { game }
    }
}

impl State for LaunchGameState {
    fn name(&self) -> &str {
        "launch game"
    }

    fn requires_input(&self) -> bool {
        false
    }

    fn display(&self, _app: &AppContext, ui: &mut UiContext) {
        ui.display("Loading GZDoom...\n");
    }

    fn handle(&self, app: &mut AppContext, ui: &mut UiContext, _input: &str) -> Step {
        if let Err(e) = app.games.start_game(&self.game, &app.config.gzdoom) {
            log::error!("Launching '{}' failed: {e}", self.game.name);
            ui.display_error(&e);
            return app.previous_state().into();
        }
        let message = format!("Game starting: {}. Good luck!", self.game.name);
        ui.display(&format!("{message}\n"));
        ui.speak(&message);
        Step::to(Rc::new(GameState::default()))
    }
}

/// Speaks the game's output until it ends, then returns to the game list
pub struct GameState {
    poll_interval: Duration,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            poll_interval: GAME_POLL_INTERVAL,
        }
    }
}

impl GameState {
    pub fn with_poll_interval(poll_interval: Duration) -> Self {
        Self { poll_interval }
    }
}

impl State for GameState {
    fn name(&self) -> &str {
        "game"
    }

    fn description(&self) -> &str {
        "You are in the game."
    }

    fn requires_input(&self) -> bool {
        false
    }

    fn handle(&self, app: &mut AppContext, ui: &mut UiContext, _input: &str) -> Step {
        if let Some(line) = app.games.next_game_line(self.poll_interval) {
            ui.speak(&line);
            return Step::stay();
        }
        if app.games.is_running() {
            return Step::stay();
        }
        ui.display("Game finished.\n");
        ui.speak("Game finished.");
        app.previous_state().into()
    }
}
