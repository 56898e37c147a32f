//! History of active states and the rewind algorithm.
//!
//! The last element is the current state. Rewinding discards the current state
//! and then keeps discarding until `depth` interactive states have been
//! removed; transient states in between are skipped without counting. The
//! last interactive state removed is returned so the caller can enter it again.

use crate::core::error::{LauncherError, Result};
use crate::core::state::StateRef;

#[derive(Default)]
pub struct StateStack {
    states: Vec<StateRef>,
}

impl StateStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn push(&mut self, state: StateRef) {
        self.states.push(state);
    }

    pub fn pop(&mut self) -> Option<StateRef> {
        self.states.pop()
    }

    pub fn peek(&self) -> Option<&StateRef> {
        self.states.last()
    }

    pub fn clear(&mut self) {
        self.states.clear();
    }

    /// Names from bottom to top, for logging
    pub fn names(&self) -> Vec<String> {
        self.states.iter().map(|s| s.name().to_string()).collect()
    }

    /// Unwind to the `depth`-th interactive state below the current one
    ///
    /// A `depth` of zero is treated as one.
    pub fn rewind(&mut self, depth: usize) -> Result<StateRef> {
        let depth = depth.max(1);
        if self.states.is_empty() {
            return Err(LauncherError::StackEmpty);
        }
        if self.states.len() < depth + 1 {
            return Err(LauncherError::StackInsufficient);
        }

        self.states.pop();
        let mut skipped = 0;
        while let Some(state) = self.states.pop() {
            if !state.requires_input() {
                continue;
            }
            skipped += 1;
            if skipped == depth {
                return Ok(state);
            }
        }
        Err(LauncherError::StackInsufficient)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::FakeState;
    use std::rc::Rc;

    fn stack_of(states: &[StateRef]) -> StateStack {
        let mut stack = StateStack::new();
        for state in states {
            stack.push(state.clone());
        }
        stack
    }

    #[test]
    fn test_push_pop_peek() {
        let mut stack = StateStack::new();
        assert!(stack.peek().is_none());
        assert!(stack.pop().is_none());

        let a: StateRef = FakeState::interactive("a");
        let b: StateRef = FakeState::interactive("b");
        stack.push(a.clone());
        stack.push(b.clone());
        assert_eq!(stack.len(), 2);
        assert!(Rc::ptr_eq(stack.peek().unwrap(), &b));
        assert!(Rc::ptr_eq(&stack.pop().unwrap(), &b));
        assert!(Rc::ptr_eq(stack.peek().unwrap(), &a));

        stack.clear();
        assert!(stack.is_empty());
    }

    #[test]
    fn test_rewind_empty_stack() {
        let mut stack = StateStack::new();
        assert!(matches!(stack.rewind(1), Err(LauncherError::StackEmpty)));
    }

    #[test]
    fn test_rewind_insufficient_stack() {
        let mut stack = stack_of(&[FakeState::interactive("root")]);
        assert!(matches!(stack.rewind(1), Err(LauncherError::StackInsufficient)));
        // the length check happens before anything is discarded
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn test_rewind_skips_transient_initiator() {
        let root: StateRef = FakeState::interactive("root");
        let menu: StateRef = FakeState::interactive("menu a");
        let toggle: StateRef = FakeState::transient("toggle");
        let mut stack = stack_of(&[root.clone(), menu.clone(), toggle]);

        let previous = stack.rewind(1).unwrap();
        assert!(Rc::ptr_eq(&previous, &menu));
        assert!(!Rc::ptr_eq(&previous, &root));
        assert_eq!(stack.names(), vec!["root"]);
    }

    #[test]
    fn test_rewind_skips_interleaved_transients() {
        let root: StateRef = FakeState::interactive("root");
        let a: StateRef = FakeState::interactive("a");
        let t: StateRef = FakeState::transient("t");
        let b: StateRef = FakeState::interactive("b");
        let mut stack = stack_of(&[root.clone(), a, t, b]);

        let target = stack.rewind(2).unwrap();
        assert!(Rc::ptr_eq(&target, &root));
        assert!(stack.is_empty());
    }

    #[test]
    fn test_rewind_two_levels_from_transient() {
        let root: StateRef = FakeState::interactive("root");
        let settings: StateRef = FakeState::interactive("settings");
        let backends: StateRef = FakeState::interactive("backends");
        let select: StateRef = FakeState::transient("select");
        let mut stack = stack_of(&[root, settings.clone(), backends, select]);

        let target = stack.rewind(2).unwrap();
        assert!(Rc::ptr_eq(&target, &settings));
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn test_rewind_runs_out_of_interactive_states() {
        let start: StateRef = FakeState::transient("start");
        let menu: StateRef = FakeState::interactive("main menu");
        let mut stack = stack_of(&[start, menu]);
        assert!(matches!(stack.rewind(1), Err(LauncherError::StackInsufficient)));
    }

    #[test]
    fn test_rewind_zero_behaves_like_one() {
        let root: StateRef = FakeState::interactive("root");
        let mut stack = stack_of(&[root.clone(), FakeState::interactive("a")]);
        assert!(Rc::ptr_eq(&stack.rewind(0).unwrap(), &root));
    }
}
