use std::cmp::Ordering;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use thiserror::Error;
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::nav::{NavNode, menu_group, menu_item};

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("IO error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to walk directory: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Build a sidebar group from the markdown pages directly inside `dir`.
///
/// Pages are ordered by file name with `index.md` first. Each label is the
/// page's first `#` heading, or the file stem when it has none. Symlinked
/// pages are listed under the link's name.
pub fn scan_menu_group<P: AsRef<Path>>(
    label: &str,
    base: &str,
    dir: P,
) -> Result<NavNode, ScanError> {
    let dir = dir.as_ref();
    let mut items = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by(compare_pages)
    {
        let entry = entry?;
        let path = entry.path();
        if !entry.file_type().is_file() || !is_markdown(path) {
            continue;
        }

        let content = std::fs::read_to_string(path).map_err(|source| ScanError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let title = page_title(&content).unwrap_or_else(|| file_stem(path));

        items.push(menu_item(title, entry.file_name().to_string_lossy()));
    }

    debug!(dir = %dir.display(), pages = items.len(), "scanned menu group");
    Ok(menu_group(label, base, items))
}

/// Text of the first level-one heading in a markdown document.
pub fn page_title(content: &str) -> Option<String> {
    let mut in_title = false;
    let mut text_buf = String::new();

    for event in Parser::new_ext(content, Options::all()) {
        match event {
            Event::Start(Tag::Heading {
                level: HeadingLevel::H1,
                ..
            }) => in_title = true,
            Event::End(TagEnd::Heading(HeadingLevel::H1)) if in_title => {
                let title = text_buf.trim();
                return (!title.is_empty()).then(|| title.to_string());
            }
            Event::Text(text) | Event::Code(text) if in_title => text_buf.push_str(&text),
            _ => continue,
        }
    }

    None
}

fn compare_pages(a: &DirEntry, b: &DirEntry) -> Ordering {
    let is_index = |e: &DirEntry| e.file_name() == OsStr::new("index.md");
    is_index(b)
        .cmp(&is_index(a))
        .then_with(|| a.file_name().cmp(b.file_name()))
}

fn is_markdown(path: &Path) -> bool {
    path.extension().map(|ext| ext == "md").unwrap_or(false)
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_default()
}
