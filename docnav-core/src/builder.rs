use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use crate::config::{Config, NavEntry, SidebarConfig};
use crate::nav::{MenuRoot, NavNode, menu_group, menu_root, nav_item, resolve_link};
use crate::scanner::{ScanError, scan_menu_group};
use crate::site::{SidebarMap, SiteNav};
use crate::typedoc::{ExternalTree, TypedocError, prepare_typedoc_sidebar};

#[derive(Debug, Error)]
pub enum AssembleError {
    #[error("TypeDoc error: {0}")]
    Typedoc(#[from] TypedocError),
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),
    #[error("IO error writing {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Default)]
pub struct SiteNavBuilder {
    nav: Vec<NavNode>,
    sidebar: SidebarMap,
}

impl SiteNavBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    // Top nav, in display order
    pub fn nav(mut self, node: NavNode) -> Self {
        self.nav.push(node);
        self
    }

    pub fn nav_items(mut self, nodes: Vec<NavNode>) -> Self {
        self.nav.extend(nodes);
        self
    }

    /// Show `root` on every page under `prefix`. A second call with the same
    /// prefix replaces the first.
    pub fn sidebar(mut self, prefix: impl Into<String>, root: MenuRoot) -> Self {
        let prefix = prefix.into();
        if self.sidebar.insert(prefix.clone(), root).is_some() {
            warn!(prefix = %prefix, "sidebar defined twice, keeping the last one");
        }
        self
    }

    pub fn build(self) -> SiteNav {
        SiteNav {
            nav: self.nav,
            sidebar: self.sidebar,
        }
    }
}

impl SiteNav {
    /// Assemble navigation from a parsed config. TypeDoc sidebars and
    /// scanned directories are looked up relative to `docs_root`.
    pub fn from_config(config: &Config, docs_root: &Path) -> Result<Self, AssembleError> {
        let mut builder = SiteNavBuilder::new();

        for entry in &config.nav {
            builder = builder.nav(top_nav_node(entry, docs_root)?.normalized());
        }
        if let Some(version) = &config.site.version {
            let mut releases = Vec::new();
            if let Some(changelog) = &config.site.changelog {
                releases.push(nav_item("Changelog", changelog.as_str()));
            }
            builder = builder.nav(nav_item(format!("v{version}"), releases));
        }

        for (prefix, sidebar) in &config.sidebar {
            let root = sidebar_root(sidebar, docs_root)?;
            debug!(prefix = %prefix, groups = root.len(), "assembled sidebar");
            builder = builder.sidebar(prefix.as_str(), root);
        }

        Ok(builder.build())
    }
}

fn top_nav_node(entry: &NavEntry, docs_root: &Path) -> Result<NavNode, AssembleError> {
    if is_group(entry) {
        return group_node(entry, docs_root);
    }

    let children = entry
        .items
        .iter()
        .map(|item| top_nav_node(item, docs_root))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(entry_node(entry, children))
}

fn sidebar_node(entry: &NavEntry, docs_root: &Path) -> Result<NavNode, AssembleError> {
    if is_group(entry) {
        return group_node(entry, docs_root);
    }

    let children = entry
        .items
        .iter()
        .map(|item| sidebar_node(item, docs_root))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(entry_node(entry, children))
}

fn group_node(entry: &NavEntry, docs_root: &Path) -> Result<NavNode, AssembleError> {
    let base = match (&entry.base, &entry.dir) {
        (Some(base), _) => base.clone(),
        (None, Some(dir)) => format!("/{}/", dir.trim_matches('/')),
        (None, None) => String::new(),
    };

    let mut node = match &entry.dir {
        Some(dir) => scan_menu_group(&entry.text, &base, docs_root.join(dir))?,
        None => {
            let children = entry
                .items
                .iter()
                .map(|item| sidebar_node(item, docs_root))
                .collect::<Result<Vec<_>, _>>()?;
            menu_group(entry.text.as_str(), base.as_str(), children)
        }
    };
    // A group's own page lives under its base like its children
    node.target = entry.link.as_deref().map(|link| resolve_link(&base, link));
    Ok(with_collapsed(node, entry.collapsed))
}

/// A link, a section, or both: `link` and `items` are kept when given.
fn entry_node(entry: &NavEntry, children: Vec<NavNode>) -> NavNode {
    let mut node = nav_item(entry.text.as_str(), children);
    node.target = entry.link.clone();
    with_collapsed(node, entry.collapsed)
}

fn sidebar_root(sidebar: &SidebarConfig, docs_root: &Path) -> Result<MenuRoot, AssembleError> {
    let mut groups = sidebar
        .groups
        .iter()
        .map(|entry| sidebar_node(entry, docs_root).map(NavNode::normalized))
        .collect::<Result<Vec<_>, _>>()?;

    if let Some(source) = &sidebar.typedoc {
        let tree = ExternalTree::read(docs_root.join(&source.path))?;
        let imported = prepare_typedoc_sidebar(&tree);
        match &source.text {
            Some(text) => {
                groups.push(with_collapsed(nav_item(text.as_str(), imported), source.collapsed))
            }
            None => groups.extend(imported),
        }
    }

    Ok(menu_root(groups))
}

fn is_group(entry: &NavEntry) -> bool {
    entry.base.is_some() || entry.dir.is_some()
}

fn with_collapsed(node: NavNode, collapsed: Option<bool>) -> NavNode {
    match collapsed {
        Some(collapsed) => node.collapsed(collapsed),
        None => node,
    }
}
