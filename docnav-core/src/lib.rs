pub mod builder;
pub mod config;
pub mod nav;
pub mod scanner;
pub mod site;
pub mod typedoc;

// Re-export main types
pub use builder::{AssembleError, SiteNavBuilder};
pub use config::{Config, ConfigError};
pub use nav::{MenuRoot, NavNode, NavTarget, menu_group, menu_item, menu_root, nav_item};
pub use scanner::{ScanError, scan_menu_group};
pub use site::{SidebarMap, SiteNav};
pub use typedoc::{ExternalTree, TypedocError, prepare_typedoc_sidebar};
