//! Settings file and per-user paths.
//!
//! Settings live in `config.toml` under the platform config directory. Every
//! field is optional; a missing, oversized or malformed file produces warnings
//! and the defaults, never an error.

use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};

const MAX_SETTINGS_FILE_BYTES: u64 = 1_048_576; // 1 MiB

/// File name of the mapping table looked up in the working and config dirs.
pub const MAPPINGS_FILE_NAME: &str = "mappings.edbv";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Mapping table to load instead of the default lookup.
    pub mappings: Option<PathBuf>,
    /// Bindings directory used when no last directory is remembered.
    pub bindings_dir: Option<PathBuf>,
    pub show_unbound: bool,
    /// Keep the GUI window above other windows.
    pub keep_on_top: bool,
    pub update: UpdateSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UpdateSettings {
    pub enabled: bool,
    /// Release metadata endpoint returning JSON with a `tag_name` field.
    pub api_url: Option<String>,
    /// Page opened when the user accepts an update notice.
    pub release_page: Option<String>,
}

impl Default for UpdateSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            api_url: None,
            release_page: None,
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("io", "edbv", "edbv")
}

pub fn config_dir() -> Option<PathBuf> {
    project_dirs().map(|p| p.config_dir().to_path_buf())
}

pub fn settings_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

/// Where the last-used bindings directory is remembered.
pub fn last_directory_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("last_directory.json"))
}

pub fn logs_dir() -> Option<PathBuf> {
    project_dirs().map(|p| p.data_local_dir().join("logs"))
}

pub fn parse_settings(content: &str) -> Result<Settings, toml::de::Error> {
    toml::from_str(content)
}

/// Load settings from `explicit` or the default settings path.
///
/// Returns defaults plus warnings when the file cannot be used. A missing
/// default file is silent; a missing explicit file is reported.
pub fn load_settings(explicit: Option<&Path>) -> (Settings, Vec<String>) {
    let mut warnings = Vec::new();
    let Some(path) = explicit.map(Path::to_path_buf).or_else(settings_path) else {
        return (Settings::default(), warnings);
    };

    if !path.exists() {
        if explicit.is_some() {
            warnings.push(format!("Config file not found: {}", path.display()));
        }
        return (Settings::default(), warnings);
    }

    let settings = match std::fs::metadata(&path) {
        Ok(meta) if meta.len() > MAX_SETTINGS_FILE_BYTES => {
            warnings.push(format!(
                "Refusing to read {}: file too large ({} bytes, max {})",
                path.display(),
                meta.len(),
                MAX_SETTINGS_FILE_BYTES
            ));
            None
        }
        Ok(_) => match std::fs::read_to_string(&path) {
            Ok(content) => match parse_settings(&content) {
                Ok(settings) => Some(settings),
                Err(err) => {
                    warnings.push(format!("Failed to parse {}: {}", path.display(), err));
                    None
                }
            },
            Err(err) => {
                warnings.push(format!("Failed to read {}: {}", path.display(), err));
                None
            }
        },
        Err(err) => {
            warnings.push(format!(
                "Failed to read metadata for {}: {}",
                path.display(),
                err
            ));
            None
        }
    };

    for warning in &warnings {
        tracing::warn!("{}", warning);
    }
    (settings.unwrap_or_default(), warnings)
}

/// Pick the mapping table path: CLI flag, settings, working directory, then
/// config directory. Explicit choices are returned even if they don't exist so
/// the loader can report them.
pub fn resolve_mappings_path(
    cli: Option<&Path>,
    settings: &Settings,
    cwd: Option<&Path>,
    config_dir: Option<&Path>,
) -> Option<PathBuf> {
    if let Some(path) = cli.or(settings.mappings.as_deref()) {
        return Some(path.to_path_buf());
    }
    [cwd, config_dir]
        .into_iter()
        .flatten()
        .map(|dir| dir.join(MAPPINGS_FILE_NAME))
        .find(|candidate| candidate.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = parse_settings("").unwrap();
        assert_eq!(settings, Settings::default());
        assert!(settings.update.enabled);
        assert!(!settings.show_unbound);
    }

    #[test]
    fn test_full_settings() {
        let settings = parse_settings(
            r#"
mappings = "/opt/edbv/mappings.edbv"
bindings_dir = "/home/cmdr/Bindings"
show_unbound = true
keep_on_top = true

[update]
enabled = false
api_url = "https://example.invalid/latest"
"#,
        )
        .unwrap();
        assert_eq!(settings.mappings, Some(PathBuf::from("/opt/edbv/mappings.edbv")));
        assert_eq!(settings.bindings_dir, Some(PathBuf::from("/home/cmdr/Bindings")));
        assert!(settings.show_unbound);
        assert!(settings.keep_on_top);
        assert!(!settings.update.enabled);
        assert_eq!(settings.update.release_page, None);
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        assert!(parse_settings("colour = \"orange\"").is_err());
        assert!(parse_settings("[update]\ninterval = 3").is_err());
    }

    #[test]
    fn test_load_settings_reports_bad_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "show_unbound = \"yes\"").unwrap();
        let (settings, warnings) = load_settings(Some(path.as_path()));
        assert_eq!(settings, Settings::default());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with("Failed to parse"));
    }

    #[test]
    fn test_load_settings_missing_explicit_file() {
        let tmp = tempfile::tempdir().unwrap();
        let (_, warnings) = load_settings(Some(tmp.path().join("missing.toml").as_path()));
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with("Config file not found"));
    }

    #[test]
    fn test_load_settings_refuses_large_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        let mut content = String::from("show_unbound = true\n");
        content.push_str(&"#".repeat((MAX_SETTINGS_FILE_BYTES as usize) + 1));
        std::fs::write(&path, content).unwrap();
        let (settings, warnings) = load_settings(Some(path.as_path()));
        assert!(!settings.show_unbound);
        assert!(warnings[0].starts_with("Refusing to read"));
    }

    #[test]
    fn test_resolve_mappings_path_order() {
        let cwd = tempfile::tempdir().unwrap();
        let cfg = tempfile::tempdir().unwrap();
        let settings = Settings::default();

        assert_eq!(
            resolve_mappings_path(None, &settings, Some(cwd.path()), Some(cfg.path())),
            None
        );

        std::fs::write(cfg.path().join(MAPPINGS_FILE_NAME), "[]").unwrap();
        assert_eq!(
            resolve_mappings_path(None, &settings, Some(cwd.path()), Some(cfg.path())),
            Some(cfg.path().join(MAPPINGS_FILE_NAME))
        );

        std::fs::write(cwd.path().join(MAPPINGS_FILE_NAME), "[]").unwrap();
        assert_eq!(
            resolve_mappings_path(None, &settings, Some(cwd.path()), Some(cfg.path())),
            Some(cwd.path().join(MAPPINGS_FILE_NAME))
        );

        let with_setting = Settings {
            mappings: Some(PathBuf::from("/from/settings.json")),
            ..Settings::default()
        };
        assert_eq!(
            resolve_mappings_path(None, &with_setting, Some(cwd.path()), None),
            Some(PathBuf::from("/from/settings.json"))
        );
        assert_eq!(
            resolve_mappings_path(
                Some(Path::new("/from/cli.json")),
                &with_setting,
                Some(cwd.path()),
                None
            ),
            Some(PathBuf::from("/from/cli.json"))
        );
    }
}
