//! The interaction loop.
//!
//! Each turn displays the current state, reads a line if the state is
//! interactive, dispatches it and moves to whatever state the step names.
//!
//! Recovery rules:
//! - end of input (or an unusable input source) goes straight to [`ExitState`]
//! - navigation errors clear the stack and restart at the start state
//! - every other error is displayed and the loop carries on

use crate::core::context::{AppContext, UiContext};
use crate::core::error::LauncherError;
use crate::core::exit::ExitState;
use crate::core::state::{StateRef, Step};
use std::rc::Rc;

/// Run until a state clears [`AppContext::running`]
pub fn run(app: &mut AppContext, ui: &mut UiContext, start: StateRef) {
    log::info!("Session started");
    let mut current = enter(app, ui, start.clone(), &start);

    while app.running {
        current.display(app, ui);

        let input = if current.requires_input() {
            match ui.read_line() {
                Ok(line) => line,
                Err(e) => {
                    if !matches!(e, LauncherError::EndOfInput) {
                        log::error!("Input failed: {e}");
                    }
                    ui.display_error(&e);
                    current = enter(app, ui, Rc::new(ExitState), &start);
                    continue;
                }
            }
        } else {
            String::new()
        };

        let Step { next, error } = app.dispatch(ui, &input);
        if let Some(e) = &error {
            ui.display_error(e);
            if e.is_navigation() {
                current = reset(app, ui, &start, e);
                continue;
            }
        }

        if let Some(next) = next.filter(|next| !Rc::ptr_eq(next, &current)) {
            if Rc::ptr_eq(&next, &start) {
                app.stack.clear();
            }
            current = enter(app, ui, next, &start);
        }
    }
    log::info!("Session finished");
}

fn enter(app: &mut AppContext, ui: &mut UiContext, state: StateRef, start: &StateRef) -> StateRef {
    let (current, error) = app.goto(state, ui);
    match error {
        Some(e) => {
            ui.display_error(&e);
            if e.is_navigation() && !Rc::ptr_eq(&current, start) {
                reset(app, ui, start, &e)
            } else {
                current
            }
        }
        None => current,
    }
}

fn reset(app: &mut AppContext, ui: &mut UiContext, start: &StateRef, cause: &LauncherError) -> StateRef {
    log::warn!("Navigation reset after: {cause} (stack: {:?})", app.stack.names());
    app.stack.clear();
    enter(app, ui, start.clone(), start)
}
