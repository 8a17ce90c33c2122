use std::path::{Path, PathBuf};

use crate::editor::DEFAULT_RESIZE_STEP;
use crate::export::DEFAULT_EXPORT_FILE_NAME;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ConfigPathError {
    MissingHomeDirectory,
}

const APP_DIR: &str = "boxmark";
const APP_CONFIG_FILE: &str = "config.json";

/// Application-level settings from `config.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    resize_step: Option<i32>,
    #[serde(default)]
    export_file_name: Option<String>,
    #[serde(default)]
    images: Vec<String>,
}

impl AppConfig {
    pub fn resize_step(&self) -> i32 {
        self.resize_step
            .filter(|step| *step > 0)
            .unwrap_or(DEFAULT_RESIZE_STEP)
    }

    pub fn export_file_name(&self) -> &str {
        self.export_file_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_EXPORT_FILE_NAME)
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }
}

/// Loads `config.json` from the explicit path, or from the XDG config
/// location when none is given. Every failure falls back to defaults.
pub fn load_app_config(explicit: Option<&Path>) -> AppConfig {
    if let Some(path) = explicit {
        return load_app_config_from(path);
    }
    let (xdg_config_home, home) = config_env_dirs();
    load_app_config_with(xdg_config_home.as_deref(), home.as_deref())
}

fn load_app_config_with(xdg_config_home: Option<&Path>, home: Option<&Path>) -> AppConfig {
    match app_config_path(APP_DIR, APP_CONFIG_FILE, xdg_config_home, home) {
        Ok(path) => load_app_config_from(&path),
        Err(_) => AppConfig::default(),
    }
}

fn load_app_config_from(path: &Path) -> AppConfig {
    if !path.exists() {
        return AppConfig::default();
    }
    match std::fs::read_to_string(path) {
        Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|err| {
            tracing::warn!(?err, ?path, "failed to parse config.json; using defaults");
            AppConfig::default()
        }),
        Err(err) => {
            tracing::warn!(?err, ?path, "failed to read config.json; using defaults");
            AppConfig::default()
        }
    }
}

pub(crate) fn config_env_dirs() -> (Option<PathBuf>, Option<PathBuf>) {
    (
        std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

pub(crate) fn app_config_path(
    app_dir: &str,
    file_name: &str,
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    let mut path = config_root(xdg_config_home, home)?;
    path.push(app_dir);
    path.push(file_name);
    Ok(path)
}

fn config_root(
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    if let Some(xdg) = xdg_config_home.filter(|path| !path.as_os_str().is_empty()) {
        return Ok(xdg.to_path_buf());
    }

    let home = home.ok_or(ConfigPathError::MissingHomeDirectory)?;
    Ok(home.join(".config"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_config_path_prefers_xdg_config_home() {
        let path = app_config_path(
            "boxmark",
            "config.json",
            Some(Path::new("/tmp/config-root")),
            Some(Path::new("/tmp/home")),
        )
        .expect("path should resolve");

        assert_eq!(path, PathBuf::from("/tmp/config-root/boxmark/config.json"));
    }

    #[test]
    fn app_config_path_falls_back_to_home_dot_config() {
        let path = app_config_path("boxmark", "config.json", None, Some(Path::new("/tmp/home")))
            .expect("path should resolve");

        assert_eq!(path, PathBuf::from("/tmp/home/.config/boxmark/config.json"));
    }

    #[test]
    fn app_config_path_errors_when_home_missing_and_xdg_unset() {
        let error = app_config_path("boxmark", "config.json", None, None).unwrap_err();
        assert_eq!(error, ConfigPathError::MissingHomeDirectory);
    }

    #[test]
    fn defaults_apply_when_fields_are_missing() {
        let config: AppConfig = serde_json::from_str("{}").expect("empty config parses");
        assert_eq!(config.resize_step(), 10);
        assert_eq!(config.export_file_name(), "annotations.json");
        assert!(config.images().is_empty());
    }

    #[test]
    fn non_positive_step_and_empty_file_name_fall_back() {
        let config: AppConfig =
            serde_json::from_str(r#"{"resize_step": 0, "export_file_name": ""}"#)
                .expect("config parses");
        assert_eq!(config.resize_step(), 10);
        assert_eq!(config.export_file_name(), "annotations.json");
    }

    #[test]
    fn load_reads_fields_from_xdg_location() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_dir = dir.path().join("boxmark");
        std::fs::create_dir_all(&config_dir).expect("create config dir");
        std::fs::write(
            config_dir.join("config.json"),
            r#"{"resize_step": 25, "export_file_name": "boxes.json", "images": ["a.png"]}"#,
        )
        .expect("write config");

        let config = load_app_config_with(Some(dir.path()), None);
        assert_eq!(config.resize_step(), 25);
        assert_eq!(config.export_file_name(), "boxes.json");
        assert_eq!(config.images(), &["a.png".to_string()]);
    }

    #[test]
    fn load_falls_back_to_defaults_on_malformed_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").expect("write config");

        assert_eq!(load_app_config(Some(path.as_path())), AppConfig::default());
    }

    #[test]
    fn load_returns_defaults_for_missing_explicit_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let absent = dir.path().join("absent.json");
        let config = load_app_config(Some(absent.as_path()));
        assert_eq!(config, AppConfig::default());
    }
}
