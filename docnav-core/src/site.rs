use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::builder::AssembleError;
use crate::nav::{MenuRoot, NavNode};

/// Sidebars keyed by route prefix, e.g. `/guide/`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SidebarMap(BTreeMap<String, MenuRoot>);

impl SidebarMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the sidebar previously stored under `prefix`, if any.
    pub fn insert(&mut self, prefix: impl Into<String>, root: MenuRoot) -> Option<MenuRoot> {
        self.0.insert(prefix.into(), root)
    }

    pub fn get(&self, prefix: &str) -> Option<&MenuRoot> {
        self.0.get(prefix)
    }

    /// The sidebar shown for `route`: the one whose prefix is the longest
    /// match.
    pub fn resolve(&self, route: &str) -> Option<(&str, &MenuRoot)> {
        self.0
            .iter()
            .filter(|(prefix, _)| route.starts_with(prefix.as_str()))
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(prefix, root)| (prefix.as_str(), root))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MenuRoot)> {
        self.0.iter().map(|(prefix, root)| (prefix.as_str(), root))
    }
}

/// Everything a site generator needs to draw navigation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteNav {
    /// Top navigation bar, left to right.
    pub nav: Vec<NavNode>,
    pub sidebar: SidebarMap,
}

impl SiteNav {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write the JSON artifact, creating parent directories as needed.
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<(), AssembleError> {
        let path = path.as_ref();
        let json = self.to_json()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| AssembleError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(path, json).map_err(|source| AssembleError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        info!(path = %path.display(), sidebars = self.sidebar.len(), "wrote navigation");
        Ok(())
    }
}
