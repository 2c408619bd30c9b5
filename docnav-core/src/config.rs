use std::{collections::BTreeMap, path::Path, path::PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Parsing(#[from] toml::de::Error),
}

/// Declarative description of a site's top nav and sidebars.
#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub nav: Vec<NavEntry>,
    /// Sidebars keyed by the route prefix they are shown under.
    #[serde(default)]
    pub sidebar: BTreeMap<String, SidebarConfig>,
}

impl Config {
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path)?;
        Self::parse(&data)
    }

    pub fn parse(data: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(data)?)
    }
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct SiteConfig {
    pub title: Option<String>,
    /// Adds a `v<version>` dropdown to the end of the top nav.
    pub version: Option<String>,
    /// Changelog link listed in the version dropdown.
    pub changelog: Option<String>,
}

/// One hand-written entry. Which builder it maps to depends on the fields:
/// `base` or `dir` make a group, `items` alone a section, otherwise a link.
#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
pub struct NavEntry {
    pub text: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub base: Option<String>,
    /// Directory, relative to the docs root, to list pages from.
    #[serde(default)]
    pub dir: Option<String>,
    #[serde(default)]
    pub collapsed: Option<bool>,
    #[serde(default)]
    pub items: Vec<NavEntry>,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
pub struct SidebarConfig {
    #[serde(default)]
    pub groups: Vec<NavEntry>,
    /// Generated API reference appended after the groups.
    #[serde(default)]
    pub typedoc: Option<TypedocSource>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct TypedocSource {
    pub path: PathBuf,
    /// Wrap the imported entries in a group with this label.
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub collapsed: Option<bool>,
}
