//! Speech output.
//!
//! Synthesizers are external speech programs found on `PATH`, plus a silent
//! fallback that is always available. Each utterance runs in its own child
//! process; a watcher thread clears that utterance's speaking flag when the
//! process exits, so the interaction loop never blocks on speech.

use crate::core::config::TtsConfig;
use crate::core::dirs::find_in_path;
use crate::core::error::{LauncherError, Result};
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

pub trait SpeechSynthesizer {
    fn name(&self) -> &str;

    /// Start speaking `text`, interrupting any previous utterance
    fn speak(&mut self, text: &str) -> Result<()>;

    fn stop(&mut self) -> Result<()>;

    fn is_speaking(&self) -> bool;

    /// Words per minute; zero restores the synthesizer default
    fn set_rate(&mut self, rate: u32) -> Result<()>;

    fn rate(&self) -> u32;
}

/// Synthesizer that only logs what it would say
#[derive(Debug, Default)]
pub struct SilentSynthesizer {
    rate: u32,
}

impl SpeechSynthesizer for SilentSynthesizer {
    fn name(&self) -> &str {
        "silent"
    }

    fn speak(&mut self, text: &str) -> Result<()> {
        log::debug!("Speaking: {text}");
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        Ok(())
    }

    fn is_speaking(&self) -> bool {
        false
    }

    fn set_rate(&mut self, rate: u32) -> Result<()> {
        self.rate = rate;
        Ok(())
    }

    fn rate(&self) -> u32 {
        self.rate
    }
}

/// Known speech programs, in order of preference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpeechProgram {
    Espeak,
    SpeechDispatcher,
    Say,
}

impl SpeechProgram {
    const ALL: [SpeechProgram; 3] = [Self::Espeak, Self::SpeechDispatcher, Self::Say];

    fn name(self) -> &'static str {
        match self {
            Self::Espeak => "espeak",
            Self::SpeechDispatcher => "speech-dispatcher",
            Self::Say => "say",
        }
    }

    fn executables(self) -> &'static [&'static str] {
        match self {
            Self::Espeak => &["espeak-ng", "espeak"],
            Self::SpeechDispatcher => &["spd-say"],
            Self::Say => &["say"],
        }
    }

    fn default_rate(self) -> u32 {
        match self {
            Self::Espeak | Self::SpeechDispatcher => 175,
            Self::Say => 180,
        }
    }

    fn args(self, rate: u32, text: &str) -> Vec<String> {
        let mut args = Vec::new();
        match self {
            Self::Espeak => args.push(format!("-s{rate}")),
            // spd-say takes a relative rate in -100..=100
            Self::SpeechDispatcher => {
                let relative = (i64::from(rate) - 175).clamp(-100, 100);
                args.extend(["-w".to_string(), "-r".to_string(), relative.to_string()]);
            }
            Self::Say => args.extend(["-r".to_string(), rate.to_string()]),
        }
        args.push(text.to_string());
        args
    }
}

/// Synthesizer driving an external speech program
#[derive(Debug)]
pub struct CommandSynthesizer {
    program: SpeechProgram,
    executable: PathBuf,
    rate: u32,
    current: Option<Utterance>,
}

#[derive(Debug)]
struct Utterance {
    child: Arc<Mutex<Child>>,
    speaking: Arc<AtomicBool>,
}

impl CommandSynthesizer {
    /// Every speech program that can be found on `PATH`
    pub fn detect() -> Vec<Self> {
        SpeechProgram::ALL
            .into_iter()
            .filter_map(|program| {
                let executable = program.executables().iter().find_map(|exe| find_in_path(exe))?;
                log::debug!("Found speech program {}", executable.display());
                Some(Self {
                    program,
                    executable,
                    rate: program.default_rate(),
                    current: None,
                })
            })
            .collect()
    }
}

impl SpeechSynthesizer for CommandSynthesizer {
    fn name(&self) -> &str {
        self.program.name()
    }

    fn speak(&mut self, text: &str) -> Result<()> {
        if text.trim().is_empty() {
            return Err(LauncherError::speech("No text to speak has been specified."));
        }
        if self.is_speaking() {
            self.stop()?;
        }

        let child = Command::new(&self.executable)
            .args(self.program.args(self.rate, text))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| LauncherError::speech(format!("Failed to start {}: {e}", self.name())))?;

        let child = Arc::new(Mutex::new(child));
        let speaking = Arc::new(AtomicBool::new(true));
        {
            let child = Arc::clone(&child);
            let speaking = Arc::clone(&speaking);
            thread::spawn(move || watch_utterance(&child, &speaking));
        }
        self.current = Some(Utterance { child, speaking });
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        let Some(utterance) = self.current.take() else {
            return Ok(());
        };
        if !utterance.speaking.swap(false, Ordering::SeqCst) {
            return Ok(());
        }
        let mut child = utterance
            .child
            .lock()
            .map_err(|_| LauncherError::speech("Speech process handle is poisoned."))?;
        child
            .kill()
            .map_err(|e| LauncherError::speech(format!("Failed to stop {}: {e}", self.program.name())))
    }

    fn is_speaking(&self) -> bool {
        self.current
            .as_ref()
            .is_some_and(|u| u.speaking.load(Ordering::SeqCst))
    }

    fn set_rate(&mut self, rate: u32) -> Result<()> {
        self.rate = if rate == 0 { self.program.default_rate() } else { rate };
        Ok(())
    }

    fn rate(&self) -> u32 {
        self.rate
    }
}

fn watch_utterance(child: &Mutex<Child>, speaking: &AtomicBool) {
    loop {
        let status = match child.lock() {
            Ok(mut child) => child.try_wait(),
            Err(_) => break,
        };
        match status {
            Ok(Some(_)) => break,
            Ok(None) if speaking.load(Ordering::SeqCst) => thread::sleep(POLL_INTERVAL),
            // stopped: the process was killed, reap it
            Ok(None) => {
                if let Ok(mut child) = child.lock() {
                    let _ = child.wait();
                }
                break;
            }
            Err(e) => {
                log::error!("Speech error: {e}");
                break;
            }
        }
    }
    speaking.store(false, Ordering::SeqCst);
}

/// Owns the available synthesizers and the selected one
pub struct TtsManager {
    synthesizers: Vec<Box<dyn SpeechSynthesizer>>,
    current: usize,
}

impl TtsManager {
    /// Only the silent synthesizer
    pub fn silent() -> Self {
        Self::with_synthesizers(Vec::new())
    }

    /// Detected speech programs followed by the silent fallback
    pub fn detect() -> Self {
        let found = CommandSynthesizer::detect()
            .into_iter()
            .map(|s| Box::new(s) as Box<dyn SpeechSynthesizer>)
            .collect();
        Self::with_synthesizers(found)
    }

    pub fn with_synthesizers(mut synthesizers: Vec<Box<dyn SpeechSynthesizer>>) -> Self {
        synthesizers.push(Box::new(SilentSynthesizer::default()));
        Self {
            synthesizers,
            current: 0,
        }
    }

    /// Select the configured synthesizer and rate, writing back what was applied
    ///
    /// An unknown synthesizer name falls back to the first available one and
    /// is reported.
    pub fn apply_config(&mut self, config: &mut TtsConfig) -> Result<()> {
        let mut outcome = Ok(());
        if !config.speech_engine.is_empty() {
            if let Err(e) = self.set_synthesizer(&config.speech_engine) {
                self.current = 0;
                outcome = Err(e);
            }
        }
        config.speech_engine = self.current_name().to_string();
        config.rate = self.set_rate(config.rate)?;
        outcome
    }

    pub fn speak(&mut self, text: &str) -> Result<()> {
        self.current_mut().speak(text)
    }

    pub fn set_synthesizer(&mut self, name: &str) -> Result<()> {
        if self.current_name() == name {
            return Ok(());
        }
        let index = self
            .synthesizers
            .iter()
            .position(|s| s.name() == name)
            .ok_or_else(|| LauncherError::speech(format!("The speech synthesizer \"{name}\" is missing.")))?;

        let rate = self.current().rate();
        self.current_mut().stop()?;
        self.current = index;
        self.current_mut().set_rate(rate)?;
        log::info!("Speech synthesizer set to {name}");
        Ok(())
    }

    /// Apply `rate` and return the rate the synthesizer actually uses
    pub fn set_rate(&mut self, rate: u32) -> Result<u32> {
        let synthesizer = self.current_mut();
        if rate > 0 || synthesizer.rate() == 0 {
            synthesizer.set_rate(rate)?;
        }
        Ok(synthesizer.rate())
    }

    pub fn available_names(&self) -> Vec<String> {
        self.synthesizers.iter().map(|s| s.name().to_string()).collect()
    }

    pub fn current_name(&self) -> &str {
        self.current().name()
    }

    pub fn is_speaking(&self) -> bool {
        self.current().is_speaking()
    }

    /// Block until the current utterance ends or `timeout` elapses
    pub fn wait(&self, timeout: Duration) {
        let started = Instant::now();
        while self.is_speaking() && started.elapsed() < timeout {
            thread::sleep(POLL_INTERVAL);
        }
    }

    /// Stop any speech in progress
    pub fn release(&mut self) {
        if let Err(e) = self.current_mut().stop() {
            log::error!("Speech error: {e}");
        }
    }

    fn current(&self) -> &dyn SpeechSynthesizer {
        self.synthesizers[self.current].as_ref()
    }

    fn current_mut(&mut self) -> &mut dyn SpeechSynthesizer {
        self.synthesizers[self.current].as_mut()
    }
}
