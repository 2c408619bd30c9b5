use anyhow::{Result, bail};
use clap::{Arg, ArgMatches, Command};
use tracing::info;

use crate::cmd::{add_common_args, assemble};
use crate::config::load_config;

pub fn make_subcommand() -> Command {
    add_common_args(Command::new("resolve"))
        .about("Print the sidebar shown for a route")
        .arg(
            Arg::new("route")
                .value_name("ROUTE")
                .help("Page route, e.g. /guide/essentials/content-scripts")
                .required(true),
        )
}

pub fn execute(args: &ArgMatches) -> Result<()> {
    let config = load_config(args)?;
    let site = assemble(config.build_config())?;

    let Some(route) = args.get_one::<String>("route") else {
        bail!("A route is required");
    };

    let Some((prefix, root)) = site.sidebar.resolve(route) else {
        bail!("No sidebar matches {route}");
    };

    info!(route = %route, prefix = %prefix, "resolved sidebar");
    println!("{}", serde_json::to_string_pretty(root)?);

    Ok(())
}
