use std::path::Path;

use anyhow::{Context, Result};
use clap::{Arg, Command};
use docnav_core::{Config, SiteNav};
use tracing::info;

use crate::config::BuildConfig;

pub mod build;
pub mod resolve;

/// Arguments shared by every subcommand that assembles navigation.
pub fn add_common_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Navigation configuration file")
                .default_value("./docnav.toml"),
        )
        .arg(
            Arg::new("root")
                .short('r')
                .long("root")
                .value_name("DIR")
                .help("Docs root that scanned directories and TypeDoc sidebars are relative to")
                .default_value("./docs"),
        )
}

/// Read the navigation config and assemble it.
pub fn assemble(build: &BuildConfig) -> Result<SiteNav> {
    let nav_config = Config::read(&build.config)
        .with_context(|| format!("Failed to load navigation config {}", build.config))?;

    info!(config = %build.config, root = %build.root, "assembling navigation");
    let site = SiteNav::from_config(&nav_config, Path::new(&build.root))
        .context("Failed to assemble navigation")?;

    Ok(site)
}
