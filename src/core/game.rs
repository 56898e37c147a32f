//! Game catalog and the GZDoom process.
//!
//! `games.json` maps a game name to its files:
//!
//! ```json
//! {"Doom 2": {"description": "...", "iwad": "doom2.wad", "files": ["mod.pk3"]}}
//! ```
//!
//! Only one game runs at a time. A monitor thread waits for the process and
//! clears the shared running flag; the game state polls that flag. Reader
//! threads pass GZDoom's stdout and stderr through a [`TextProcessor`] and
//! queue the lines to speak on a channel the game state drains.

use crate::core::config::GzdoomConfig;
use crate::core::dirs::DataPaths;
use crate::core::error::{LauncherError, Result};
use crate::core::text_rules::{TextProcessor, TextRules};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

const MONITOR_INTERVAL: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GameData {
    #[serde(skip)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub iwad: String,
    #[serde(default)]
    pub config: Option<String>,
    #[serde(default)]
    pub files: Vec<String>,
    #[serde(default)]
    pub params: Vec<String>,
}

impl GameData {
    pub fn new(name: impl Into<String>, iwad: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            iwad: iwad.into(),
            config: None,
            files: Vec::new(),
            params: Vec::new(),
        }
    }
}

/// Read the catalog, sorted by name
///
/// Invalid entries are skipped and reported together; a missing file is an
/// empty catalog.
pub fn load_catalog(path: &Path) -> (Vec<GameData>, Option<LauncherError>) {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::info!("No game catalog at {}", path.display());
            return (Vec::new(), None);
        }
        Err(e) => return (Vec::new(), Some(LauncherError::in_file(path, e.into()))),
    };

    let entries: BTreeMap<String, Value> = match serde_json::from_str(&content) {
        Ok(entries) => entries,
        Err(e) => return (Vec::new(), Some(LauncherError::in_file(path, e.into()))),
    };

    let mut games = Vec::with_capacity(entries.len());
    let mut errors = Vec::new();
    for (name, value) in entries {
        match serde_json::from_value::<GameData>(value) {
            Ok(game) if game.iwad.trim().is_empty() => {
                errors.push(LauncherError::invalid_game(name, "field \"iwad\" is empty"));
            }
            Ok(mut game) => {
                game.name = name;
                games.push(game);
            }
            Err(e) => errors.push(LauncherError::invalid_game(name, e)),
        }
    }
    log::debug!("Loaded {} game(s) from {}", games.len(), path.display());

    let warning = LauncherError::aggregate(errors).map(|e| LauncherError::in_file(path, e));
    (games, warning)
}

struct RunningGame {
    name: String,
    child: Arc<Mutex<Child>>,
    running: Arc<AtomicBool>,
    stopping: Arc<AtomicBool>,
    speech: Receiver<String>,
}

pub struct GameManager {
    paths: DataPaths,
    games: Vec<GameData>,
    text_rules: Arc<TextRules>,
    current: Option<RunningGame>,
}

impl GameManager {
    pub fn new(paths: DataPaths, games: Vec<GameData>) -> Self {
        Self {
            paths,
            games,
            text_rules: Arc::new(TextRules::default()),
            current: None,
        }
    }

    /// Rules for speaking the output of every game started afterwards
    pub fn with_text_rules(mut self, rules: TextRules) -> Self {
        self.text_rules = Arc::new(rules);
        self
    }

    pub fn available_games(&self) -> &[GameData] {
        &self.games
    }

    pub fn paths(&self) -> &DataPaths {
        &self.paths
    }

    pub fn is_running(&self) -> bool {
        self.current
            .as_ref()
            .is_some_and(|game| game.running.load(Ordering::SeqCst))
    }

    pub fn start_game(&mut self, game: &GameData, config: &GzdoomConfig) -> Result<()> {
        if self.is_running() {
            return Err(LauncherError::process("Another game is already running."));
        }
        let gzdoom = self
            .paths
            .gzdoom_path()
            .map_err(|e| LauncherError::process(format!("Failed to find GZDoom: {e}")))?;
        let args = self.build_args(game, config);
        log::debug!("Running {} {}", gzdoom.display(), args.join(" "));

        let mut child = Command::new(&gzdoom)
            .args(&args)
            .env("DOOMWADDIR", &self.paths.files_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| LauncherError::process(format!("Failed to start game: {e}")))?;

        let (speech_tx, speech) = mpsc::channel();
        let processor = Arc::new(Mutex::new(TextProcessor::new(Arc::clone(&self.text_rules))));
        let debug_output = config.debug_output;
        if let Some(out) = child.stdout.take() {
            let processor = Arc::clone(&processor);
            let speech_tx = speech_tx.clone();
            thread::spawn(move || forward_output(out, &processor, &speech_tx, debug_output));
        }
        if let Some(err) = child.stderr.take() {
            thread::spawn(move || forward_output(err, &processor, &speech_tx, debug_output));
        }

        let running = Arc::new(AtomicBool::new(true));
        let stopping = Arc::new(AtomicBool::new(false));
        let child = Arc::new(Mutex::new(child));
        {
            let child = Arc::clone(&child);
            let running = Arc::clone(&running);
            let stopping = Arc::clone(&stopping);
            thread::spawn(move || monitor_game(&child, &running, &stopping));
        }

        log::info!("Game '{}' started", game.name);
        self.current = Some(RunningGame {
            name: game.name.clone(),
            child,
            running,
            stopping,
            speech,
        });
        Ok(())
    }

    /// Next line of game output to speak, waiting at most `timeout`
    ///
    /// Returns at once when no game was started.
    pub fn next_game_line(&self, timeout: Duration) -> Option<String> {
        let game = self.current.as_ref()?;
        match game.speech.recv_timeout(timeout) {
            Ok(line) => Some(line),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => {
                // output is closed but the monitor has not noticed the exit yet
                if game.running.load(Ordering::SeqCst) {
                    thread::sleep(timeout.min(MONITOR_INTERVAL));
                }
                None
            }
        }
    }

    /// Kill the running game, if any
    pub fn stop_game(&mut self) -> Result<()> {
        let Some(game) = self.current.take() else {
            return Ok(());
        };
        if !game.running.load(Ordering::SeqCst) {
            return Ok(());
        }
        game.stopping.store(true, Ordering::SeqCst);
        let mut child = game
            .child
            .lock()
            .map_err(|_| LauncherError::process("Game process handle is poisoned."))?;
        child
            .kill()
            .map_err(|e| LauncherError::process(format!("Failed to stop game: {e}")))?;
        log::info!("Game '{}' stopped", game.name);
        Ok(())
    }

    /// GZDoom command line for `game`
    ///
    /// Referenced files missing from the data directory are left out with a
    /// warning.
    pub fn build_args(&self, game: &GameData, config: &GzdoomConfig) -> Vec<String> {
        let mut args = vec!["-stdout".to_string()];
        if config.logging {
            args.push("+logfile".to_string());
            args.push(self.paths.gzdoom_log_file().display().to_string());
        }
        for param in config.additional_params.iter().chain(&game.params) {
            args.extend(param.split_whitespace().map(str::to_string));
        }

        args.push("+vid_preferbackend".to_string());
        args.push(config.video_backend.index().to_string());
        if !config.music {
            args.push("-nomusic".to_string());
        }
        if !config.sound_fx {
            args.push("-nosfx".to_string());
        }

        if let Some(file) = &game.config {
            let path = self.paths.game_file(file);
            if path.is_file() {
                args.push("-config".to_string());
                args.push(path.display().to_string());
            } else {
                log::warn!("Configuration file {} for game {} is not found", path.display(), game.name);
            }
        }

        if self.paths.game_file(&game.iwad).is_file() {
            args.push("-iwad".to_string());
            args.push(game.iwad.clone());
        } else {
            log::warn!("IWAD {} for game {} is not found", game.iwad, game.name);
        }

        let files: Vec<&String> = game
            .files
            .iter()
            .filter(|file| {
                let found = self.paths.game_file(file).is_file();
                if !found {
                    log::warn!("Additional file {file} for game {} is not found", game.name);
                }
                found
            })
            .collect();
        if !files.is_empty() {
            args.push("-file".to_string());
            args.extend(files.into_iter().cloned());
        }
        args
    }
}

/// Feed one output stream of the game to the shared processor
fn forward_output<R: Read>(
    stream: R,
    processor: &Mutex<TextProcessor>,
    speech: &Sender<String>,
    debug_output: bool,
) {
    let mut reader = BufReader::new(stream);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                log::warn!("Reading game output failed: {e}");
                break;
            }
        }
        let text = String::from_utf8_lossy(&buf);
        let line = text.trim_end_matches(['\r', '\n']);
        if debug_output {
            log::info!("gzdoom: {line}");
        }

        let spoken = match processor.lock() {
            Ok(mut processor) => processor.process(line),
            Err(_) => None,
        };
        if let Some(spoken) = spoken {
            log::debug!("Speaking game output: {spoken}");
            // the receiver is gone once the game has been replaced; keep draining
            let _ = speech.send(spoken);
        }
    }
}

fn monitor_game(child: &Mutex<Child>, running: &AtomicBool, stopping: &AtomicBool) {
    loop {
        let status = match child.lock() {
            Ok(mut child) => child.try_wait(),
            Err(_) => break,
        };
        match status {
            Ok(Some(status)) => {
                if !status.success() && !stopping.load(Ordering::SeqCst) {
                    log::error!("Game process error: {status}");
                }
                break;
            }
            Ok(None) => thread::sleep(MONITOR_INTERVAL),
            Err(e) => {
                log::error!("Game process error: {e}");
                break;
            }
        }
    }
    running.store(false, Ordering::SeqCst);
    log::info!("Game finished.");
}
