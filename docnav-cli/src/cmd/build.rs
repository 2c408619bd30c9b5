use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command};

use crate::cmd::{add_common_args, assemble};
use crate::config::load_config;

pub fn make_subcommand() -> Command {
    add_common_args(Command::new("build"))
        .about("Assemble navigation and write it as JSON")
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Where to write the navigation JSON")
                .default_value("./.docnav/nav.json"),
        )
}

pub fn execute(args: &ArgMatches) -> Result<()> {
    // Load cascading configuration
    let config = load_config(args)?;
    let build = config.build_config();

    let site = assemble(build)?;
    site.write(&build.output)
        .with_context(|| format!("Failed to write {}", build.output))?;

    println!(
        "Navigation written to {} ({} nav entries, {} sidebars)",
        build.output,
        site.nav.len(),
        site.sidebar.len()
    );

    Ok(())
}
