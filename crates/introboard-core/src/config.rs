//! Configuration types for introboard.
//!
//! [`Config::load`] reads `~/.config/introboard/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::defaults`] returns
//! the same defaults without touching the filesystem (useful in tests).

use serde::Deserialize;
use std::path::PathBuf;

use crate::card::Toggles;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[data]
local_path           = "public/students.json"
remote_url           = "https://dvonb.xyz/api/2025-fall/itis-3135/students?full=1"
default_image_origin = "https://dvonb.xyz"
public_dir           = "public"

[ui]
slideshow       = false
hidden_sections = []
probe_images    = true

[site]
title  = "Course Introductions || ITIS 3135"
course = "ITIS 3135"
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration, loaded from `~/.config/introboard/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub site: SiteConfig,
}

/// `[data]` section: where records and images come from.
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// Tried first. A missing or invalid file silently falls through.
    #[serde(default = "default_local_path")]
    pub local_path: PathBuf,
    #[serde(default = "default_remote_url")]
    pub remote_url: String,
    /// Origin for the one-time image fallback.
    #[serde(default = "default_image_origin")]
    pub default_image_origin: String,
    /// Root that bare local image paths resolve under.
    #[serde(default = "default_public_dir")]
    pub public_dir: PathBuf,
}

fn default_local_path() -> PathBuf { PathBuf::from("public/students.json") }
fn default_remote_url() -> String {
    "https://dvonb.xyz/api/2025-fall/itis-3135/students?full=1".to_string()
}
fn default_image_origin() -> String { crate::image::DEFAULT_IMAGE_ORIGIN.to_string() }
fn default_public_dir() -> PathBuf { PathBuf::from("public") }

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            local_path: default_local_path(),
            remote_url: default_remote_url(),
            default_image_origin: default_image_origin(),
            public_dir: default_public_dir(),
        }
    }
}

/// `[ui]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default)]
    pub slideshow: bool,
    /// Section names hidden at startup (`"mascot"`, `"links"`, …).
    #[serde(default)]
    pub hidden_sections: Vec<String>,
    #[serde(default = "default_probe_images")]
    pub probe_images: bool,
}

fn default_probe_images() -> bool { true }

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            slideshow: false,
            hidden_sections: Vec::new(),
            probe_images: default_probe_images(),
        }
    }
}

impl UiConfig {
    pub fn toggles(&self) -> Toggles {
        Toggles::with_hidden(&self.hidden_sections)
    }
}

/// `[site]` section: header and window-title text.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    #[serde(default = "default_site_title")]
    pub title: String,
    #[serde(default = "default_course")]
    pub course: String,
}

fn default_site_title() -> String { "Course Introductions || ITIS 3135".to_string() }
fn default_course() -> String { "ITIS 3135".to_string() }

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: default_site_title(),
            course: default_course(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/introboard/config.toml`, layered on top of the
    /// built-in defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
        }

        Self::load_from(&path)
    }

    /// Layer the file at `path` (if present) over the built-in defaults.
    pub fn load_from(path: &std::path::Path) -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(false))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("introboard")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
