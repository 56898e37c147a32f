//! Common assertion helpers for launcher output
//!
//! Predicates over the text the launcher writes, shared by the binary tests.

#![allow(dead_code)]

use predicates::prelude::*;

/// Checks that the main menu was shown
pub fn has_main_menu() -> impl Predicate<str> {
    predicates::str::contains("0. Exit.\n1. Play.\n2. Settings.\nMake your choice.\n")
}

/// Checks that the session ended through the exit screen
pub fn says_good_bye() -> impl Predicate<str> {
    predicates::str::contains("Good bye!")
}

/// Checks for the version line printed by the version command
pub fn has_version_line() -> impl Predicate<str> {
    predicates::str::contains("Toby Doom Launcher version: ")
        .and(predicates::str::contains(", built: "))
}

/// Checks for a configuration problem reported at startup
pub fn config_error() -> impl Predicate<str> {
    predicates::str::contains("Error in file").and(predicates::str::contains("config.json"))
}

/// Checks that the menu rejected a number it does not contain
pub fn no_such_item() -> impl Predicate<str> {
    predicates::str::contains("There is no such item in the menu.")
}
