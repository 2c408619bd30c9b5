//! Import of sidebars generated by TypeDoc's VitePress theme.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::nav::{NavNode, resolve_link};

#[derive(Debug, Error)]
pub enum TypedocError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid TypeDoc sidebar {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// One entry as emitted by the generator. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalEntry {
    pub text: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub collapsed: Option<bool>,
    #[serde(default)]
    pub items: Option<Vec<ExternalEntry>>,
}

/// A generated sidebar, in the order the generator wrote it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExternalTree(pub Vec<ExternalEntry>);

impl ExternalTree {
    pub fn from_json(data: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(data)
    }

    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self, TypedocError> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path).map_err(|source| TypedocError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tree = Self::from_json(&data).map_err(|source| TypedocError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(path = %path.display(), entries = tree.0.len(), "loaded TypeDoc sidebar");
        Ok(tree)
    }
}

/// Convert a generated sidebar into navigation nodes.
///
/// Entry order is kept exactly as emitted; it follows declaration order in
/// the documented source. Links get the same `.md` normalization as
/// hand-written entries, and groups without an explicit `collapsed` flag
/// start collapsed.
pub fn prepare_typedoc_sidebar(tree: &ExternalTree) -> Vec<NavNode> {
    tree.0.iter().map(convert_entry).collect()
}

fn convert_entry(entry: &ExternalEntry) -> NavNode {
    let children: Vec<NavNode> = entry.items.iter().flatten().map(convert_entry).collect();
    let collapsed = if children.is_empty() {
        None
    } else {
        Some(entry.collapsed.unwrap_or(true))
    };

    NavNode {
        label: entry.text.clone(),
        target: entry.link.as_deref().map(|link| resolve_link("", link)),
        base_path: None,
        collapsed,
        children,
    }
}
