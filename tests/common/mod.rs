//! Shared test utilities for toby-launcher
//!
//! Integration tests run against throwaway data directories, either through
//! the compiled binary or through a scripted in-process session.

pub mod assertions;
pub mod data_dir;
pub mod fixtures;
