//! Core functionality for the launcher.
//!
//! This module provides the navigation engine (states, the state stack, the
//! command registry and the interaction loop), the reusable state variants and
//! the collaborators the application states drive: configuration, the game
//! process, speech and the rules for speaking game output.

pub mod command;
pub mod command_registry;
pub mod config;
pub mod confirmation;
pub mod console;
pub mod context;
pub mod dirs;
pub mod error;
pub mod exit;
pub mod game;
pub mod input_parser;
pub mod menu;
pub mod output;
pub mod session;
pub mod speech;
pub mod state;
pub mod state_stack;
pub mod templates;
pub mod text_rules;
pub mod toggle;

#[cfg(test)]
pub(crate) mod testing;

// === Error handling ===
// Core error types, result type and the presenter turning errors into text
pub use error::{ErrorPresenter, LauncherError, Result, StdErrorPresenter};

// === Navigation engine ===
// States, commands and the controller that moves between them
pub use command::{Command, CommandRef};
pub use command_registry::CommandRegistry;
pub use context::{AppContext, UiContext};
pub use session::run;
pub use state::{State, StateRef, Step};
pub use state_stack::StateStack;

// === Reusable states ===
pub use confirmation::ConfirmationDialog;
pub use exit::ExitState;
pub use menu::{MenuOption, MenuState};
pub use toggle::{toggle_option, ConfigFlag, ToggleState};

// === Input and output ===
// Console implementations, bounded integer parsing and text formatting
pub use console::{Console, ScriptedConsole, StdConsole, Transcript};
pub use input_parser::InputParser;
pub use output::{print_error, wrap_text};
pub use templates::{render_template, TemplateParams};

// === Collaborators ===
pub use config::{Config, GzdoomConfig, TtsConfig, VideoBackend};
pub use dirs::DataPaths;
pub use game::{load_catalog, GameData, GameManager};
pub use speech::{SpeechSynthesizer, TtsManager};
pub use text_rules::{load_text_rules, TextProcessor, TextRules};
