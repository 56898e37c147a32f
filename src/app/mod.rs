//! The launcher's own states and menus.
//!
//! Navigation map:
//! ```text
//! start -> main menu -> game selection -> launch -> game
//!                   \-> settings -> speech settings -> synthesizers
//!                                \                  \-> speech rate
//!                                 \-> gzdoom settings -> launch parameters
//!                                                     \-> video backends
//! ```

pub mod games;
pub mod gzdoom;
pub mod menus;
pub mod speech;

pub use games::{GameSelectionState, GameState, LaunchGameState};
pub use gzdoom::{gzdoom_settings_menu, video_backend_menu, LaunchParamsState, SelectVideoBackendState};
pub use menus::{main_menu, settings_menu, StartState};
pub use speech::{speech_settings_menu, synthesizer_menu, SpeechRateState};

use crate::commands::BackCommand;
use crate::core::command::CommandRef;
use std::rc::Rc;

/// Local commands of every sub-menu and prompt
pub(crate) fn back_only() -> Vec<CommandRef> {
    vec![Rc::new(BackCommand)]
}
