mod cmd;
mod config;

use anyhow::Result;
use clap::{Arg, ArgAction, Command};
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    Command::new("docnav")
        .about("Build documentation site navigation and sidebars")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Log progress at info level")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .subcommand(cmd::build::make_subcommand())
        .subcommand(cmd::resolve::make_subcommand())
}

fn main() -> Result<()> {
    let matches = cli().get_matches();

    // --verbose enables INFO, otherwise RUST_LOG decides
    let filter = if matches.get_flag("verbose") {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match matches.subcommand() {
        Some(("build", args)) => cmd::build::execute(args),
        Some(("resolve", args)) => cmd::resolve::execute(args),
        _ => unreachable!("subcommand is required"),
    }
}
