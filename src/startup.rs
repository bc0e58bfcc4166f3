//! Builds the initial viewer session from the command line and settings.

use crate::cli::Cli;
use crate::config::{self, Settings};
use anyhow::Context;
use edbv_core::storage::{read_last_directory, write_last_directory};
use edbv_core::{MappingTable, Viewer, load_mappings};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub struct Startup {
    pub viewer: Viewer,
    pub settings: Settings,
    /// First status line to show.
    pub status: String,
    /// Non-fatal problems found while starting up.
    pub warnings: Vec<String>,
    /// Where interactive directory changes are remembered.
    pub last_dir_marker: Option<PathBuf>,
}

/// Per-user locations used at startup. Split out so tests can point them at
/// temporary directories.
#[derive(Debug, Clone, Default)]
pub struct Locations {
    pub cwd: Option<PathBuf>,
    pub config_dir: Option<PathBuf>,
    pub last_dir_marker: Option<PathBuf>,
}

impl Locations {
    pub fn from_env() -> Self {
        Self {
            cwd: std::env::current_dir().ok(),
            config_dir: config::config_dir(),
            last_dir_marker: config::last_directory_path(),
        }
    }
}

pub fn build(cli: &Cli) -> anyhow::Result<Startup> {
    let (settings, warnings) = config::load_settings(cli.config.as_deref());
    let mut startup = build_with(cli, settings, &Locations::from_env())?;
    startup.warnings.splice(0..0, warnings);
    Ok(startup)
}

/// Build the session.
///
/// The directory comes from the `FILE` argument's parent, then `--dir`, then
/// the remembered directory, then `bindings_dir` from settings. Only a `FILE`
/// that fails to load is fatal.
pub fn build_with(cli: &Cli, settings: Settings, locations: &Locations) -> anyhow::Result<Startup> {
    let mut warnings = Vec::new();

    let mappings = match config::resolve_mappings_path(
        cli.mappings.as_deref(),
        &settings,
        locations.cwd.as_deref(),
        locations.config_dir.as_deref(),
    ) {
        Some(path) => {
            let (table, mapping_warnings) = load_mappings(&path);
            warnings.extend(mapping_warnings);
            table
        }
        None => {
            let message = format!(
                "No mapping table found ({} in the working or config directory)",
                config::MAPPINGS_FILE_NAME
            );
            tracing::warn!("{}", message);
            warnings.push(message);
            MappingTable::new()
        }
    };

    let mut viewer = Viewer::new(Arc::new(mappings));
    viewer.set_highlight_unbound(cli.show_unbound || settings.show_unbound);
    if let Some(filter) = &cli.filter {
        viewer.set_filter(filter);
    }

    if let Some(file) = &cli.file {
        if let Some(parent) = file.parent().filter(|p| !p.as_os_str().is_empty())
            && let Err(err) = viewer.open_directory(parent)
        {
            warnings.push(format!("Could not scan {}: {}", parent.display(), err));
        }
        viewer
            .load_file(file)
            .with_context(|| format!("Failed to load {}", file.display()))?;
    } else {
        let candidates = [
            cli.dir.clone(),
            locations
                .last_dir_marker
                .as_deref()
                .and_then(read_last_directory),
            settings.bindings_dir.clone(),
        ];
        if let Some(dir) = candidates.into_iter().flatten().next()
            && let Err(err) = viewer.open_directory(&dir)
        {
            warnings.push(format!("Could not open {}: {}", dir.display(), err));
        }
    }

    let status = match (warnings.last(), viewer.directory()) {
        (Some(warning), _) => warning.clone(),
        (None, Some(dir)) => format!("Current Bindings Directory: {}", dir.display()),
        (None, None) => "No bindings directory selected".to_string(),
    };

    Ok(Startup {
        viewer,
        settings,
        status,
        warnings,
        last_dir_marker: locations.last_dir_marker.clone(),
    })
}

/// Remember `dir` as the bindings directory for the next start.
pub fn remember_directory(marker: Option<&Path>, dir: &Path) -> edbv_core::Result<()> {
    match marker {
        Some(marker) => write_last_directory(marker, dir),
        None => Ok(()),
    }
}
