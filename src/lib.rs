//! Toby Launcher - an accessible, screen-reader friendly console launcher for GZDoom.
//!
//! The launcher is a line-oriented menu system: every screen is plain text that
//! reads well through a screen reader, and every choice is a number or a short
//! command. Its engine is a stack-based navigation state machine with global and
//! local commands, multi-level rewind and recovery from corrupted navigation.
//!
//! # Public API
//! The main public interface is re-exported from the [`core`] module, which provides:
//! - States, the state stack and the interaction loop
//! - Command registry with alias and prefix resolution
//! - Reusable menu, confirmation, toggle and exit states
//! - Configuration, game catalog, GZDoom process and speech collaborators
//! - Error handling and result types
//!
//! The launcher's own screens live in [`app`], the built-in commands in [`commands`].

pub mod app;
pub mod commands;
pub mod core;

// Re-export the core public API for external users
pub use crate::core::{
    // Navigation engine
    run,
    AppContext,
    Command,
    CommandRef,
    CommandRegistry,
    // Collaborators
    Config,
    // Reusable states
    ConfirmationDialog,
    // Input and output
    Console,
    DataPaths,
    ExitState,
    GameData,
    GameManager,
    // Error handling
    LauncherError,
    MenuOption,
    MenuState,
    Result,
    ScriptedConsole,
    State,
    StateRef,
    StdConsole,
    Step,
    Transcript,
    TtsManager,
    UiContext,
};
