//! Predefined data directories and session runners
//!
//! Scenarios shared by the binary tests and the in-process navigation tests.

#![allow(dead_code)]

use super::data_dir::*;
use anyhow::Result;
use assert_cmd::prelude::*;
use assert_cmd::Command;
use std::io::Read;
use std::process::{Child, Stdio};
use std::rc::Rc;
use toby_launcher::app::StartState;
use toby_launcher::commands::default_global_commands;
use toby_launcher::core::load_catalog;
use toby_launcher::{
    run, AppContext, Config, DataPaths, GameManager, ScriptedConsole, Transcript, TtsManager,
    UiContext,
};

pub const CATALOG: &str = r#"{
    "Freedoom": {
        "description": "A free game for the Doom engine.",
        "iwad": "freedoom2.wad"
    },
    "Doom 2": {
        "iwad": "doom2.wad",
        "files": ["maps.pk3"],
        "params": ["-skill", "3"]
    }
}"#;

/// Scenario: data directory with a two-game catalog
pub fn create_catalog_dir() -> Result<TestDataDir> {
    let dir = setup_data_dir()?;
    write_file(dir.path(), "games.json", CATALOG)?;
    Ok(dir)
}

/// Scenario: data directory whose config file is not JSON
pub fn create_broken_config_dir() -> Result<TestDataDir> {
    let dir = setup_data_dir()?;
    write_file(dir.path(), "config.json", "{ this is not json")?;
    Ok(dir)
}

/// The launcher binary pointed at `dir`, silent and unwrapped
pub fn launcher(dir: &TestDataDir) -> Result<Command> {
    let mut cmd = Command::cargo_bin("toby-launcher")?;
    cmd.arg("--data-dir")
        .arg(dir.path())
        .arg("--no-speech")
        .arg("--width")
        .arg("0");
    Ok(cmd)
}

/// Starts the launcher on `dir` with piped stdin and stdout
///
/// The caller owns the child's stdin; dropping it closes the input.
pub fn spawn_launcher(dir: &TestDataDir) -> Result<Child> {
    let child = std::process::Command::cargo_bin("toby-launcher")?
        .arg("--data-dir")
        .arg(dir.path())
        .arg("--no-speech")
        .arg("--width")
        .arg("0")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()?;
    Ok(child)
}

/// Reads output until the launcher waits at its `> ` prompt
pub fn read_until_prompt(output: &mut impl Read) -> Result<String> {
    let mut text = Vec::new();
    let mut byte = [0u8; 1];
    while !text.ends_with(b"> ") {
        if output.read(&mut byte)? == 0 {
            anyhow::bail!("output ended before the prompt");
        }
        text.push(byte[0]);
    }
    Ok(String::from_utf8_lossy(&text).into_owned())
}

/// Runs a whole in-process session over the scripted `inputs`
///
/// The catalog is read from `dir`, speech is silent and output is not wrapped.
pub fn run_session(dir: &TestDataDir, inputs: &[&str]) -> (AppContext, Transcript) {
    let paths = DataPaths::at(dir.path());
    let (games, _) = load_catalog(&paths.games_file());
    let mut config = Config::default();
    let mut tts = TtsManager::silent();
    let _ = tts.apply_config(&mut config.tts);
    let mut app = AppContext::new(config, GameManager::new(paths, games));

    let console = ScriptedConsole::new(inputs.iter().copied());
    let transcript = console.transcript();
    let mut ui = UiContext::new(Box::new(console), tts).with_wrap_width(0);
    ui.registry.register_global_commands(default_global_commands());

    run(&mut app, &mut ui, Rc::new(StartState));
    (app, transcript)
}
