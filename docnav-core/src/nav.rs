//! Navigation tree nodes and the builders used to describe them.
//!
//! Nodes serialize with the field names static-site generators expect
//! (`text`, `link`, `base`, `collapsed`, `items`), so a built tree can be
//! handed to a theme as-is.

use serde::{Deserialize, Serialize};

/// A single entry in a navigation bar or sidebar: a link, a group, or both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavNode {
    #[serde(rename = "text")]
    pub label: String,
    #[serde(rename = "link", default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// Route prefix the children were resolved against. Only set on groups.
    #[serde(rename = "base", default, skip_serializing_if = "Option::is_none")]
    pub base_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collapsed: Option<bool>,
    #[serde(rename = "items", default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavNode>,
}

impl NavNode {
    fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            target: None,
            base_path: None,
            collapsed: None,
            children: Vec::new(),
        }
    }

    pub fn is_group(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn is_external(&self) -> bool {
        self.target.as_deref().is_some_and(is_external)
    }

    /// Mark a group as initially collapsed (or expanded).
    pub fn collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed = Some(collapsed);
        self
    }

    /// Normalize every link in this subtree without adding a base: `.md`
    /// is dropped and `index.md` maps to its directory.
    pub fn normalized(self) -> Self {
        self.rebase("")
    }

    /// Resolve this node and everything below it against `base`.
    ///
    /// Relative targets and relative group bases become routes under `base`;
    /// site-absolute routes and external URLs are left alone.
    fn rebase(self, base: &str) -> Self {
        Self {
            target: self.target.map(|t| resolve_link(base, &t)),
            base_path: self.base_path.map(|b| resolve_link(base, &b)),
            children: self
                .children
                .into_iter()
                .map(|child| child.rebase(base))
                .collect(),
            ..self
        }
    }
}

/// What a top-level nav entry points at: a page or a dropdown of entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavTarget {
    Link(String),
    Items(Vec<NavNode>),
}

impl From<&str> for NavTarget {
    fn from(link: &str) -> Self {
        NavTarget::Link(link.to_string())
    }
}

impl From<String> for NavTarget {
    fn from(link: String) -> Self {
        NavTarget::Link(link)
    }
}

impl From<Vec<NavNode>> for NavTarget {
    fn from(items: Vec<NavNode>) -> Self {
        NavTarget::Items(items)
    }
}

/// Ordered groups making up one sidebar.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MenuRoot(Vec<NavNode>);

impl MenuRoot {
    pub fn groups(&self) -> &[NavNode] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NavNode> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a MenuRoot {
    type Item = &'a NavNode;
    type IntoIter = std::slice::Iter<'a, NavNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Build a top navigation entry.
///
/// A string target produces a plain link; a list of nodes produces a
/// dropdown holding those nodes in order.
pub fn nav_item(label: impl Into<String>, target: impl Into<NavTarget>) -> NavNode {
    let mut node = NavNode::new(label);
    match target.into() {
        NavTarget::Link(link) => node.target = Some(link),
        NavTarget::Items(children) => node.children = children,
    }
    node
}

/// Build a sidebar page entry.
///
/// `file` stays as written until the entry is placed in a [`menu_group`],
/// which resolves it against the group's base path.
pub fn menu_item(label: impl Into<String>, file: impl Into<String>) -> NavNode {
    let mut node = NavNode::new(label);
    node.target = Some(file.into());
    node
}

/// Build a sidebar group whose children live under `base`.
///
/// Nested groups with a relative base are resolved against this one, so
/// `menu_group("A", "/guide/", vec![menu_group("B", "advanced/", ..)])`
/// places B's pages under `/guide/advanced/`.
pub fn menu_group(
    label: impl Into<String>,
    base: impl Into<String>,
    children: Vec<NavNode>,
) -> NavNode {
    let base = base.into();
    let mut node = NavNode::new(label);
    node.children = children
        .into_iter()
        .map(|child| child.rebase(&base))
        .collect();
    node.base_path = Some(base);
    node
}

/// Wrap groups as the tree for a single sidebar.
pub fn menu_root(groups: Vec<NavNode>) -> MenuRoot {
    MenuRoot(groups)
}

/// Resolve `target` against `base` into a site route.
///
/// - external URLs (`https://..`, `mailto:..`) and fragment-only links are
///   returned unchanged
/// - site-absolute targets keep their path but are still normalized
/// - a trailing `.md` is dropped and `index.md` maps to its directory
/// - a `#fragment` suffix is carried over
pub fn resolve_link(base: &str, target: &str) -> String {
    if is_external(target) {
        return target.to_string();
    }

    let (path, fragment) = match target.find('#') {
        Some(idx) => target.split_at(idx),
        None => (target, ""),
    };
    if path.is_empty() {
        return target.to_string();
    }

    let joined = if path.starts_with('/') || base.is_empty() {
        path.to_string()
    } else {
        join_route(base, path)
    };

    let mut route = normalize_route(&joined);
    route.push_str(fragment);
    route
}

/// True for links that leave the site: anything with a URL scheme.
pub fn is_external(target: &str) -> bool {
    let Some((scheme, rest)) = target.split_once(':') else {
        return false;
    };

    let valid_scheme = scheme
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic())
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));

    valid_scheme && (rest.starts_with("//") || matches!(scheme, "mailto" | "tel"))
}

fn join_route(base: &str, path: &str) -> String {
    let path = path.trim_start_matches("./");
    format!("{}/{}", base.trim_end_matches('/'), path)
}

fn normalize_route(path: &str) -> String {
    if path == "index.md" {
        return String::new();
    }
    if let Some(dir) = path.strip_suffix("/index.md") {
        return format!("{dir}/");
    }
    path.strip_suffix(".md").unwrap_or(path).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_menu_item_resolved_under_group_base() {
        let group = menu_group(
            "Get Started",
            "/guide/get-started/",
            vec![menu_item("Introduction", "introduction.md")],
        );

        assert_eq!(
            group.children[0].target.as_deref(),
            Some("/guide/get-started/introduction")
        );
        assert_eq!(group.base_path.as_deref(), Some("/guide/get-started/"));
    }

    #[test]
    fn test_base_without_trailing_slash() {
        assert_eq!(resolve_link("/guide", "installation.md"), "/guide/installation");
        assert_eq!(resolve_link("/guide/", "./installation.md"), "/guide/installation");
    }

    #[test]
    fn test_index_resolves_to_directory() {
        assert_eq!(resolve_link("/guide/", "index.md"), "/guide/");
        assert_eq!(resolve_link("/guide/", "essentials/index.md"), "/guide/essentials/");
    }

    #[test]
    fn test_fragment_is_kept() {
        assert_eq!(
            resolve_link("/guide/", "config.md#manifest"),
            "/guide/config#manifest"
        );
        assert_eq!(resolve_link("/guide/", "#top"), "#top");
    }

    #[test]
    fn test_external_links_pass_through() {
        let url = "https://github.com/wxt-dev/wxt/blob/main/CHANGELOG.md";
        let group = menu_group("Links", "/guide/", vec![menu_item("Changelog", url)]);

        assert_eq!(group.children[0].target.as_deref(), Some(url));
        assert!(group.children[0].is_external());
        assert_eq!(resolve_link("/x/", "mailto:hi@example.com"), "mailto:hi@example.com");
    }

    #[test]
    fn test_site_absolute_target_not_prefixed() {
        assert_eq!(resolve_link("/guide/", "/api/config.md"), "/api/config");
    }

    #[test]
    fn test_is_external() {
        assert!(is_external("https://wxt.dev"));
        assert!(is_external("mailto:someone@example.com"));
        assert!(!is_external("/guide/installation"));
        assert!(!is_external("introduction.md"));
        assert!(!is_external("c:notes.md"));
    }

    #[test]
    fn test_nested_group_with_relative_base() {
        let group = menu_group(
            "Guide",
            "/guide/",
            vec![
                menu_item("Installation", "installation.md"),
                menu_group(
                    "Advanced",
                    "advanced/",
                    vec![
                        menu_item("Overview", "index.md"),
                        menu_item("Hooks", "hooks.md"),
                    ],
                ),
            ],
        );

        let advanced = &group.children[1];
        assert_eq!(advanced.base_path.as_deref(), Some("/guide/advanced/"));
        let links: Vec<_> = advanced
            .children
            .iter()
            .map(|c| c.target.as_deref().unwrap_or_default())
            .collect();
        assert_eq!(links, vec!["/guide/advanced/", "/guide/advanced/hooks"]);
    }

    #[test]
    fn test_nested_group_with_absolute_base() {
        let group = menu_group(
            "Guide",
            "/guide/",
            vec![menu_group("API", "/api/", vec![menu_item("Config", "config.md")])],
        );

        assert_eq!(group.children[0].children[0].target.as_deref(), Some("/api/config"));
    }

    #[test]
    fn test_nav_item_link_and_dropdown() {
        let link = nav_item("Guide", "/guide/installation");
        assert_eq!(link.target.as_deref(), Some("/guide/installation"));
        assert!(!link.is_group());

        let dropdown = nav_item(
            "v0.19.0",
            vec![nav_item("Changelog", "https://github.com/wxt-dev/wxt/releases")],
        );
        assert_eq!(dropdown.target, None);
        assert_eq!(dropdown.children.len(), 1);
        assert!(dropdown.is_group());
    }

    #[test]
    fn test_menu_root_empty() {
        let root = menu_root(Vec::new());
        assert!(root.is_empty());
        assert_eq!(serde_json::to_string(&root).unwrap(), "[]");
    }

    #[test]
    fn test_serialized_shape() {
        let group = menu_group(
            "Essentials",
            "/guide/essentials/",
            vec![menu_item("Content Scripts", "content-scripts.md")],
        )
        .collapsed(true);

        let json = serde_json::to_value(&group).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "text": "Essentials",
                "base": "/guide/essentials/",
                "collapsed": true,
                "items": [
                    { "text": "Content Scripts", "link": "/guide/essentials/content-scripts" }
                ]
            })
        );
    }
}
