use crate::core::error::{LauncherError, Result};
use std::path::{Path, PathBuf};

pub const APP_DIR_NAME: &str = "toby-launcher";
pub const HOME_ENV: &str = "TOBY_LAUNCHER_HOME";

/// Locations of everything the launcher reads or writes
#[derive(Debug, Clone, PartialEq)]
pub struct DataPaths {
    pub base_dir: PathBuf,
    pub files_dir: PathBuf,
}

impl DataPaths {
    /// Paths rooted at `base_dir`, without touching the filesystem
    pub fn at(base_dir: impl Into<PathBuf>) -> Self {
        let base_dir = base_dir.into();
        let files_dir = base_dir.join("files");
        Self { base_dir, files_dir }
    }

    /// Resolve the data directory and make sure its `files/` folder exists
    ///
    /// Order: explicit override, `TOBY_LAUNCHER_HOME`, a portable `data/`
    /// directory next to the executable, the platform config directory.
    pub fn resolve(explicit: Option<PathBuf>) -> Result<Self> {
        let base_dir = match explicit.or_else(|| std::env::var_os(HOME_ENV).map(PathBuf::from)) {
            Some(dir) => dir,
            None => match portable_data_dir() {
                Some(dir) => dir,
                None => get_config_directory()?,
            },
        };
        let paths = Self::at(base_dir);
        std::fs::create_dir_all(&paths.files_dir).map_err(|source| {
            LauncherError::DataDirectoryCreationFailed {
                path: paths.files_dir.clone(),
                source,
            }
        })?;
        log::debug!("Using data directory {}", paths.base_dir.display());
        Ok(paths)
    }

    pub fn config_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    pub fn games_file(&self) -> PathBuf {
        self.base_dir.join("games.json")
    }

    /// Rules for speaking game output
    pub fn text_rules_file(&self) -> PathBuf {
        self.base_dir.join("text_rules.json")
    }

    pub fn log_file(&self) -> PathBuf {
        self.base_dir.join(format!("{APP_DIR_NAME}.log"))
    }

    pub fn gzdoom_log_file(&self) -> PathBuf {
        self.base_dir.join("gzdoom.log")
    }

    pub fn game_file(&self, name: &str) -> PathBuf {
        self.files_dir.join(name)
    }

    /// Locate the GZDoom executable: PATH, then the data directory, then the
    /// macOS application bundle
    pub fn gzdoom_path(&self) -> Result<PathBuf> {
        let exe_name = if cfg!(windows) { "gzdoom.exe" } else { "gzdoom" };

        if let Some(path) = find_in_path(exe_name) {
            return Ok(path);
        }

        let bundled = if cfg!(target_os = "macos") {
            self.base_dir
                .join("gzdoom/GZDoom.app/Contents/MacOS")
                .join(exe_name)
        } else {
            self.base_dir.join("gzdoom").join(exe_name)
        };
        if bundled.is_file() {
            return Ok(bundled);
        }

        if cfg!(target_os = "macos") {
            let app = Path::new("/Applications/GZDoom.app/Contents/MacOS").join(exe_name);
            if app.is_file() {
                return Ok(app);
            }
        }

        Err(LauncherError::GzdoomNotFound)
    }
}

/// Search every directory of `PATH` for `program`
pub fn find_in_path(program: &str) -> Option<PathBuf> {
    let path = std::env::var_os("PATH")?;
    std::env::split_paths(&path)
        .map(|dir| dir.join(program))
        .find(|candidate| candidate.is_file())
}

fn portable_data_dir() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    let data = exe.parent()?.join("data");
    data.is_dir().then_some(data)
}

pub fn get_config_directory() -> Result<PathBuf> {
    let base = match std::env::consts::OS {
        "linux" | "freebsd" | "netbsd" | "openbsd" => std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .ok()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config"))),
        "macos" => dirs::home_dir().map(|home| home.join("Library/Application Support")),
        _ => dirs::config_dir(),
    };

    base.map(|dir| dir.join(APP_DIR_NAME))
        .ok_or(LauncherError::DataDirectoryNotFound)
}
