//! Settings file for the convert command
//!
//! ```toml
//! # trajflat.toml
//! [conversion]
//! input_dir = "data/rmd17"
//! output_dir = "data/rmd17_cleaned"
//! drop_legacy_fields = true
//! drop_hydrogen = false
//! tsv = false
//! ```
//!
//! Every key is optional. Command-line flags win over file values, which win
//! over built-in defaults.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettingsFile {
    #[serde(default)]
    pub conversion: ConvertSettings,
}

/// Keys of the `[conversion]` table; `None` where the file is silent
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConvertSettings {
    pub input_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub drop_legacy_fields: Option<bool>,
    pub drop_hydrogen: Option<bool>,
    pub tsv: Option<bool>,
}

impl SettingsFile {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read settings file {}", path.display()))?;
        text.parse()
            .with_context(|| format!("Invalid settings in {}", path.display()))
    }
}

impl FromStr for SettingsFile {
    type Err = toml::de::Error;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        toml::from_str(text)
    }
}
