//! The state contract and the result of a navigation step.
//!
//! A state is one point of interaction: it renders itself, optionally waits
//! for a line of input and decides where navigation goes next. States are
//! shared as [`StateRef`] so that the stack, the loop and confirmation dialogs
//! can hold the same state; "the same state" always means `Rc::ptr_eq`.
//!
//! # Public API
//! - [`State`]: Capability interface with defaults for every hook
//! - [`StateRef`]: Shared handle to a state
//! - [`Step`]: Next state (or none, to stay) plus an optional error

use crate::core::command::CommandRef;
use crate::core::context::{AppContext, UiContext};
use crate::core::error::{LauncherError, Result};
use std::rc::Rc;

/// Shared handle to a state
pub type StateRef = Rc<dyn State>;

pub trait State {
    fn name(&self) -> &str {
        "unknown"
    }

    /// Help text shown by the `help` command
    fn description(&self) -> &str {
        "The description for this state is not defined."
    }

    /// Commands available only while this state is current
    fn local_commands(&self) -> Vec<CommandRef> {
        Vec::new()
    }

    /// Interactive states block for a line; transient states are handled at once
    fn requires_input(&self) -> bool {
        true
    }

    /// Called right after the state is pushed; may redirect elsewhere
    fn init(&self, _app: &mut AppContext, _ui: &mut UiContext) -> Step {
        Step::stay()
    }

    fn handle(&self, _app: &mut AppContext, _ui: &mut UiContext, _input: &str) -> Step {
        Step::stay()
    }

    fn display(&self, _app: &AppContext, _ui: &mut UiContext) {}

    /// The state a pending confirmation leads to, if this state is a dialog
    fn confirmation_target(&self) -> Option<StateRef> {
        None
    }
}

/// Outcome of `init`, `handle` or a command
///
/// `next == None` keeps the current state. An error never replaces the
/// state: both are reported, and the loop continues with whatever state the
/// step names.
#[derive(Default)]
pub struct Step {
    pub next: Option<StateRef>,
    pub error: Option<LauncherError>,
}

impl Step {
    /// Remain on the current state
    pub fn stay() -> Self {
        Self::default()
    }

    /// Move to `state`
    pub fn to(state: StateRef) -> Self {
        Self {
            next: Some(state),
            error: None,
        }
    }

    /// Remain on the current state and report `error`
    pub fn rejected(error: LauncherError) -> Self {
        Self {
            next: None,
            error: Some(error),
        }
    }

    /// Move to `state` and report `error`
    pub fn to_with_error(state: StateRef, error: LauncherError) -> Self {
        Self {
            next: Some(state),
            error: Some(error),
        }
    }

    /// True when the step names `state` as the next state
    pub fn leads_to(&self, state: &StateRef) -> bool {
        self.next.as_ref().is_some_and(|next| Rc::ptr_eq(next, state))
    }
}

impl From<Result<StateRef>> for Step {
    fn from(result: Result<StateRef>) -> Self {
        match result {
            Ok(state) => Self::to(state),
            Err(error) => Self::rejected(error),
        }
    }
}

impl std::fmt::Debug for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Step")
            .field("next", &self.next.as_ref().map(|s| s.name().to_string()))
            .field("error", &self.error)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::FakeState;

    #[test]
    fn test_default_hooks() {
        let fake: StateRef = FakeState::interactive("menu");
        assert!(fake.requires_input());
        assert!(fake.local_commands().is_empty());
        assert!(fake.confirmation_target().is_none());
    }

    #[test]
    fn test_step_constructors() {
        let state: StateRef = FakeState::interactive("a");
        assert!(Step::stay().next.is_none());
        assert!(Step::to(state.clone()).leads_to(&state));

        let rejected = Step::rejected(LauncherError::NotAnInteger);
        assert!(rejected.next.is_none());
        assert!(rejected.error.is_some());

        let both = Step::to_with_error(state.clone(), LauncherError::OutOfBounds);
        assert!(both.leads_to(&state));
        assert!(both.error.is_some());
    }

    #[test]
    fn test_step_from_result() {
        let state: StateRef = FakeState::interactive("a");
        assert!(Step::from(Ok(state.clone())).leads_to(&state));

        let failed = Step::from(Err(LauncherError::StackEmpty));
        assert!(failed.next.is_none());
        assert!(matches!(failed.error, Some(LauncherError::StackEmpty)));
    }

    #[test]
    fn test_leads_to_uses_identity() {
        let a: StateRef = FakeState::interactive("same");
        let b: StateRef = FakeState::interactive("same");
        assert!(!Step::to(a).leads_to(&b));
    }
}
