use anyhow::Result;
use clap::ArgMatches;
use clap::parser::ValueSource;
use config::{Config as ConfigBuilder, Environment, File};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// CLI settings merged from defaults, the config file, env vars and flags.
///
/// The navigation tree itself lives in the same file but is read by
/// `docnav_core::Config`; only the `[build]` table is used here.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DocnavConfig {
    #[serde(default)]
    pub build: BuildConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Navigation configuration file
    pub config: String,
    /// Docs root for scanned directories and TypeDoc sidebars
    pub root: String,
    /// Output path of the navigation JSON
    pub output: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            config: "./docnav.toml".to_string(),
            root: "./docs".to_string(),
            output: "./.docnav/nav.json".to_string(),
        }
    }
}

impl DocnavConfig {
    /// Load configuration with cascading precedence:
    /// 1. CLI arguments (highest priority)
    /// 2. Environment variables (DOCNAV_*)
    /// 3. Configuration file
    /// 4. Defaults (lowest priority)
    pub fn load(args: &ArgMatches) -> Result<Self> {
        let config_file = args
            .get_one::<String>("config")
            .cloned()
            .unwrap_or_else(|| BuildConfig::default().config);

        let mut builder = ConfigBuilder::builder();

        // 1. Start with defaults
        builder = builder.add_source(ConfigBuilder::try_from(&Self::default())?);

        // 2. Add configuration file if it exists
        if Path::new(&config_file).exists() {
            builder = builder.add_source(File::from(Path::new(&config_file)));
        }

        // 3. Add environment variables with DOCNAV_ prefix
        builder = builder.add_source(
            Environment::with_prefix("DOCNAV")
                .prefix_separator("_")
                .separator("__"), // Use double underscore for nested keys
        );

        // 4. Override with CLI arguments actually given on the command line,
        // so clap defaults don't mask file or env values
        let mut cli_overrides = HashMap::new();
        for key in ["config", "root", "output"] {
            if let Some(value) = explicit_arg(args, key) {
                cli_overrides.insert(format!("build.{key}"), value);
            }
        }
        // The file that was read is always the one reported back
        cli_overrides.insert("build.config".to_string(), config_file);

        builder = builder.add_source(ConfigBuilder::try_from(&cli_overrides)?);

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    pub fn build_config(&self) -> &BuildConfig {
        &self.build
    }
}

fn explicit_arg(args: &ArgMatches, id: &str) -> Option<String> {
    // try_get_one: not every subcommand defines every argument
    let value = args.try_get_one::<String>(id).ok().flatten()?;
    match args.value_source(id) {
        Some(ValueSource::CommandLine) => Some(value.clone()),
        _ => None,
    }
}

pub fn load_config(args: &ArgMatches) -> Result<DocnavConfig> {
    DocnavConfig::load(args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd;

    #[test]
    fn test_default_config() {
        let config = DocnavConfig::default();
        assert_eq!(config.build.config, "./docnav.toml");
        assert_eq!(config.build.root, "./docs");
        assert_eq!(config.build.output, "./.docnav/nav.json");
    }

    #[test]
    fn test_cli_args_override() {
        let matches = cmd::build::make_subcommand()
            .try_get_matches_from(vec![
                "build",
                "--config",
                "/nonexistent/docnav.toml",
                "--output",
                "/custom/nav.json",
            ])
            .unwrap();

        let config = DocnavConfig::load(&matches).unwrap();
        assert_eq!(config.build.output, "/custom/nav.json");
        assert_eq!(config.build.config, "/nonexistent/docnav.toml");
        // Should still have defaults for non-overridden values
        assert_eq!(config.build.root, "./docs");
    }

    #[test]
    fn test_file_values_beat_clap_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docnav.toml");
        std::fs::write(
            &path,
            r#"
            [build]
            root = "website"
            output = "website/.vitepress/nav.json"

            [[nav]]
            text = "Guide"
            link = "/guide/"
            "#,
        )
        .unwrap();
        let path = path.to_string_lossy().to_string();

        let matches = cmd::build::make_subcommand()
            .try_get_matches_from(vec!["build", "--config", &path, "--root", "site"])
            .unwrap();

        let config = DocnavConfig::load(&matches).unwrap();
        assert_eq!(config.build.output, "website/.vitepress/nav.json");
        assert_eq!(config.build.root, "site");
        assert_eq!(config.build.config, path);
    }

    #[test]
    fn test_resolve_has_no_output_arg() {
        let matches = cmd::resolve::make_subcommand()
            .try_get_matches_from(vec!["resolve", "--config", "/nonexistent.toml", "/guide/"])
            .unwrap();

        let config = DocnavConfig::load(&matches).unwrap();
        assert_eq!(config.build.output, "./.docnav/nav.json");
    }
}
