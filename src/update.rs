//! Best-effort check for a newer release.
//!
//! The check runs on a detached thread and reports through a channel that the
//! UI polls with `try_recv`. Every failure is logged and swallowed.

use crate::config::UpdateSettings;
use std::sync::mpsc::{self, Receiver};
use thiserror::Error;

pub const CURRENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// A release newer than (or at least different from) the running build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateNotice {
    pub latest: String,
    pub current: String,
    pub release_page: Option<String>,
}

impl UpdateNotice {
    pub fn message(&self) -> String {
        format!(
            "A new version ({}) is available. You are using version {}.",
            self.latest, self.current
        )
    }
}

#[derive(Error, Debug)]
pub enum UpdateError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("server returned HTTP {0}")]
    Status(u16),

    #[error("invalid release metadata: {0}")]
    Parse(String),
}

/// Compare a release tag against the running version.
///
/// Leading `v`s are stripped from the tag. Any mismatch counts as an update;
/// tags are not ordered.
pub fn newer_release(tag: &str, current: &str) -> Option<String> {
    let latest = tag.trim().trim_start_matches('v');
    if latest.is_empty() || latest == current {
        None
    } else {
        Some(latest.to_string())
    }
}

#[cfg(feature = "update-check")]
fn fetch_latest_tag(url: &str) -> Result<String, UpdateError> {
    use reqwest::blocking::Client;

    #[derive(serde::Deserialize)]
    struct ReleaseMetadata {
        tag_name: String,
    }

    let client = Client::builder()
        .timeout(std::time::Duration::from_secs(10))
        .user_agent(concat!("edbv/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| UpdateError::Request(e.to_string()))?;

    let response = client
        .get(url)
        .send()
        .map_err(|e| UpdateError::Request(e.to_string()))?;

    if !response.status().is_success() {
        return Err(UpdateError::Status(response.status().as_u16()));
    }

    let metadata: ReleaseMetadata = response
        .json()
        .map_err(|e| UpdateError::Parse(e.to_string()))?;
    Ok(metadata.tag_name)
}

#[cfg(not(feature = "update-check"))]
fn fetch_latest_tag(_url: &str) -> Result<String, UpdateError> {
    Err(UpdateError::Request(
        "built without the update-check feature".to_string(),
    ))
}

/// Start the background check if it is enabled and has an endpoint.
pub fn spawn_check(settings: &UpdateSettings) -> Option<Receiver<UpdateNotice>> {
    if !settings.enabled || cfg!(not(feature = "update-check")) {
        return None;
    }
    let Some(url) = settings.api_url.clone() else {
        tracing::debug!("no release endpoint configured, skipping update check");
        return None;
    };
    let release_page = settings.release_page.clone();

    let (tx, rx) = mpsc::channel();
    let spawned = std::thread::Builder::new()
        .name("update-check".to_string())
        .spawn(move || match fetch_latest_tag(&url) {
            Ok(tag) => {
                if let Some(latest) = newer_release(&tag, CURRENT_VERSION) {
                    tracing::info!(latest = %latest, "update available");
                    let _ = tx.send(UpdateNotice {
                        latest,
                        current: CURRENT_VERSION.to_string(),
                        release_page,
                    });
                } else {
                    tracing::debug!(tag = %tag, "running the latest release");
                }
            }
            Err(err) => tracing::warn!("Error checking for updates: {}", err),
        });

    match spawned {
        Ok(_) => Some(rx),
        Err(err) => {
            tracing::warn!("could not start update check: {}", err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_version_is_not_an_update() {
        assert_eq!(newer_release("v1.0.1", "1.0.1"), None);
        assert_eq!(newer_release("1.0.1", "1.0.1"), None);
        assert_eq!(newer_release(" v1.0.1\n", "1.0.1"), None);
    }

    #[test]
    fn test_mismatch_is_an_update() {
        assert_eq!(newer_release("v1.1.0", "1.0.1"), Some("1.1.0".to_string()));
        assert_eq!(newer_release("vv2.0", "1.0.1"), Some("2.0".to_string()));
    }

    #[test]
    fn test_empty_tag_is_ignored() {
        assert_eq!(newer_release("", "1.0.1"), None);
        assert_eq!(newer_release("v", "1.0.1"), None);
    }

    #[test]
    fn test_disabled_or_unconfigured_check_does_not_spawn() {
        let disabled = UpdateSettings {
            enabled: false,
            api_url: Some("http://127.0.0.1:9/latest".to_string()),
            release_page: None,
        };
        assert!(spawn_check(&disabled).is_none());
        assert!(spawn_check(&UpdateSettings::default()).is_none());
    }

    #[test]
    fn test_notice_message() {
        let notice = UpdateNotice {
            latest: "1.1.0".to_string(),
            current: "1.0.1".to_string(),
            release_page: None,
        };
        assert_eq!(
            notice.message(),
            "A new version (1.1.0) is available. You are using version 1.0.1."
        );
    }
}
