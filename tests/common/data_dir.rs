//! Temporary data directory management for integration tests
//!
//! Provides a data directory that looks like the one the launcher creates on
//! first start, plus helpers to seed and inspect its JSON files.

#![allow(dead_code)]

use anyhow::Result;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A data directory that is removed when dropped
pub struct TestDataDir {
    _temp_dir: TempDir,
    pub path: PathBuf,
}

impl TestDataDir {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config_file(&self) -> PathBuf {
        self.path.join("config.json")
    }

    pub fn games_file(&self) -> PathBuf {
        self.path.join("games.json")
    }

    pub fn log_file(&self) -> PathBuf {
        self.path.join("toby-launcher.log")
    }
}

/// Creates an empty data directory with its `files/` subdirectory
pub fn setup_data_dir() -> Result<TestDataDir> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().to_path_buf();
    fs::create_dir_all(path.join("files"))?;
    Ok(TestDataDir {
        _temp_dir: temp_dir,
        path,
    })
}

/// Writes raw text to a file inside the data directory
pub fn write_file(dir: &Path, name: &str, content: &str) -> Result<()> {
    fs::write(dir.join(name), content)?;
    Ok(())
}

/// Reads `config.json` back as untyped JSON
pub fn read_config(dir: &TestDataDir) -> Result<Value> {
    let text = fs::read_to_string(dir.config_file())?;
    Ok(serde_json::from_str(&text)?)
}
