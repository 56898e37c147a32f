//! Persistent launcher settings (`config.json`).
//!
//! The file is read through loose `Raw*` mirrors so that every missing section,
//! missing field and bad parameter can be reported together instead of stopping
//! at the first one. Valid values are kept; the rest fall back to defaults.

use crate::core::error::{LauncherError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::path::Path;

pub const MAX_SPEECH_RATE: u32 = 1000;

const PARAM_VIDEO_BACKEND: &str = "vid_preferbackend";
const PARAM_MUSIC: &str = "music";
const PARAM_SOUND_FX: &str = "sound_fx";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub tts: TtsConfig,
    pub gzdoom: GzdoomConfig,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TtsConfig {
    /// Empty selects the first available synthesizer
    pub speech_engine: String,
    /// Words per minute; zero keeps the synthesizer's own default
    pub rate: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GzdoomConfig {
    pub video_backend: VideoBackend,
    pub music: bool,
    pub sound_fx: bool,
    pub additional_params: Vec<String>,
    pub debug_output: bool,
    pub logging: bool,
}

impl Default for GzdoomConfig {
    fn default() -> Self {
        Self {
            video_backend: VideoBackend::OpenGl,
            music: true,
            sound_fx: true,
            additional_params: Vec::new(),
            debug_output: false,
            logging: false,
        }
    }
}

/// Renderer passed to GZDoom as `+vid_preferbackend`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VideoBackend {
    #[default]
    OpenGl,
    Vulkan,
    OpenGlEs,
}

impl VideoBackend {
    pub const ALL: [VideoBackend; 3] = [Self::OpenGl, Self::Vulkan, Self::OpenGlEs];

    pub fn index(self) -> u8 {
        match self {
            Self::OpenGl => 0,
            Self::Vulkan => 1,
            Self::OpenGlEs => 2,
        }
    }

    pub fn from_index(index: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|b| i64::from(b.index()) == index)
    }
}

impl fmt::Display for VideoBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::OpenGl => "OpenGL",
            Self::Vulkan => "Vulkan",
            Self::OpenGlEs => "OpenGL ES",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct RawConfig {
    tts: Option<RawTts>,
    gzdoom: Option<RawGzdoom>,
}

#[derive(Debug, Serialize, Deserialize)]
struct RawTts {
    speech_engine: Option<String>,
    rate: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
struct RawGzdoom {
    params: Option<Map<String, Value>>,
    additional_params: Option<Vec<String>>,
    #[serde(default)]
    debug_output: bool,
    #[serde(default)]
    logging: bool,
}

impl Config {
    /// Read `path`, keeping every valid value
    ///
    /// A missing file yields the defaults with no warning. Any problem found in
    /// an existing file is returned next to the salvaged configuration.
    pub fn load(path: &Path) -> (Self, Option<LauncherError>) {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No configuration at {}, using defaults", path.display());
                return (Self::default(), None);
            }
            Err(e) => return (Self::default(), Some(LauncherError::in_file(path, e.into()))),
        };

        let raw: RawConfig = match serde_json::from_str(&content) {
            Ok(raw) => raw,
            Err(e) => return (Self::default(), Some(LauncherError::in_file(path, e.into()))),
        };

        let (config, errors) = Self::from_raw(raw);
        let warning = LauncherError::aggregate(errors).map(|e| LauncherError::in_file(path, e));
        (config, warning)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.to_raw())?;
        std::fs::write(path, content)?;
        log::debug!("Configuration saved to {}", path.display());
        Ok(())
    }

    fn from_raw(raw: RawConfig) -> (Self, Vec<LauncherError>) {
        let mut config = Self::default();
        let mut errors = Vec::new();

        match raw.tts {
            Some(tts) => config.tts.apply(tts, &mut errors),
            None => errors.push(LauncherError::missing_section("tts")),
        }
        match raw.gzdoom {
            Some(gzdoom) => config.gzdoom.apply(gzdoom, &mut errors),
            None => errors.push(LauncherError::missing_section("gzdoom")),
        }

        (config, errors)
    }

    fn to_raw(&self) -> RawConfig {
        let mut params = Map::new();
        params.insert(
            PARAM_VIDEO_BACKEND.to_string(),
            Value::from(self.gzdoom.video_backend.index()),
        );
        params.insert(PARAM_MUSIC.to_string(), Value::from(self.gzdoom.music));
        params.insert(PARAM_SOUND_FX.to_string(), Value::from(self.gzdoom.sound_fx));

        RawConfig {
            tts: Some(RawTts {
                speech_engine: Some(self.tts.speech_engine.clone()),
                rate: Some(i64::from(self.tts.rate)),
            }),
            gzdoom: Some(RawGzdoom {
                params: Some(params),
                additional_params: Some(self.gzdoom.additional_params.clone()),
                debug_output: self.gzdoom.debug_output,
                logging: self.gzdoom.logging,
            }),
        }
    }
}

impl TtsConfig {
    fn apply(&mut self, raw: RawTts, errors: &mut Vec<LauncherError>) {
        match raw.speech_engine {
            Some(engine) => self.speech_engine = engine,
            None => errors.push(LauncherError::missing_field("tts.speech_engine")),
        }
        match raw.rate {
            Some(rate) => match u32::try_from(rate) {
                Ok(rate) if rate <= MAX_SPEECH_RATE => self.rate = rate,
                _ => errors.push(LauncherError::invalid_field(
                    "tts.rate",
                    format!("expected a number from 0 to {MAX_SPEECH_RATE}, got {rate}"),
                )),
            },
            None => errors.push(LauncherError::missing_field("tts.rate")),
        }
    }
}

impl GzdoomConfig {
    fn apply(&mut self, raw: RawGzdoom, errors: &mut Vec<LauncherError>) {
        match raw.params {
            Some(params) => {
                for (key, value) in params {
                    if let Err(e) = self.set_param(&key, &value) {
                        errors.push(e);
                    }
                }
            }
            None => errors.push(LauncherError::missing_field("gzdoom.params")),
        }
        match raw.additional_params {
            Some(params) => self.additional_params = params,
            None => errors.push(LauncherError::missing_field("gzdoom.additional_params")),
        }
        self.debug_output = raw.debug_output;
        self.logging = raw.logging;
    }

    fn set_param(&mut self, key: &str, value: &Value) -> Result<()> {
        let field = format!("gzdoom.params.{key}");
        match key {
            PARAM_VIDEO_BACKEND => {
                self.video_backend = value
                    .as_i64()
                    .and_then(VideoBackend::from_index)
                    .ok_or_else(|| LauncherError::invalid_field(field, format!("unknown video backend {value}")))?;
            }
            PARAM_MUSIC | PARAM_SOUND_FX => {
                let enabled = value
                    .as_bool()
                    .ok_or_else(|| LauncherError::invalid_field(field, format!("expected bool, got {value}")))?;
                if key == PARAM_MUSIC {
                    self.music = enabled;
                } else {
                    self.sound_fx = enabled;
                }
            }
            _ => return Err(LauncherError::unknown_param(key)),
        }
        Ok(())
    }
}
