//! Build file loading

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::error::{ConfigError, Result};

use super::defaults::build_file_names;

/// Load and deserialize a build file; the format follows the file extension
pub fn load_build_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let format = if path.extension().is_some_and(|e| e == "toml") {
        "TOML"
    } else {
        "YAML"
    };
    info!(path = %path.display(), format, "loading build file");

    let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

    let file: T = if format == "TOML" {
        toml::from_str(&content).map_err(ConfigError::TomlError)?
    } else {
        serde_yaml::from_str(&content).map_err(ConfigError::YamlError)?
    };

    debug!(path = %path.display(), "build file loaded");
    Ok(file)
}

/// Find a build file in `start_dir` or the nearest parent directory that has one
pub fn find_build_file(start_dir: &Path) -> Option<PathBuf> {
    debug!(start_dir = %start_dir.display(), "searching for build file");
    let mut current = start_dir.to_path_buf();

    loop {
        for name in build_file_names() {
            let candidate = current.join(name);
            if candidate.exists() {
                info!(path = %candidate.display(), "found build file");
                return Some(candidate);
            }
        }

        if !current.pop() {
            break;
        }
    }

    debug!("no build file found");
    None
}

/// Locate and load the build file governing `dir`
pub fn load_build_file_from_dir<T: DeserializeOwned>(dir: &Path) -> Result<(T, PathBuf)> {
    let path = find_build_file(dir).ok_or_else(|| ConfigError::NotFound(dir.to_path_buf()))?;

    let file = load_build_file(&path)?;
    Ok((file, path))
}
