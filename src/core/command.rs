//! The command contract.
//!
//! A command is a named action the user can type from any interactive state.
//! Global commands live for the whole session; local commands are declared by
//! the current state and replaced on every transition.

use crate::core::context::{AppContext, UiContext};
use crate::core::state::Step;
use std::rc::Rc;

/// Shared handle to a command
pub type CommandRef = Rc<dyn Command>;

pub trait Command {
    /// Canonical name, compared case-insensitively when resolving input
    fn name(&self) -> &str;

    fn description(&self) -> &str {
        "The description for this command is not defined."
    }

    fn aliases(&self) -> &[&str] {
        &[]
    }

    /// Run the command; `args[0]` is the lowercased token that selected it
    fn execute(&self, app: &mut AppContext, ui: &mut UiContext, args: &[String]) -> Step;
}
