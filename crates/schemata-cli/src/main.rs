use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use std::path::PathBuf;

mod commands;
mod error;
mod utils;

#[derive(Parser, Debug)]
#[command(name = "schemata")]
#[command(about = "Resolve schema files that reference each other's types", long_about = None)]
struct Args {
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Resolve every schema file and report the ones that cannot be resolved
    Check {
        /// Project directory (defaults to the nearest one containing schemata.toml)
        #[arg(value_name = "PATH")]
        path: Option<PathBuf>,
    },

    /// List every resolved type and the files defining it
    Types {
        /// Project directory (defaults to the nearest one containing schemata.toml)
        #[arg(value_name = "PATH")]
        path: Option<PathBuf>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Create a new project
    New {
        /// Directory to create the project in
        #[arg(value_name = "PATH")]
        path: PathBuf,
        /// Directory for schema files, relative to the project
        #[arg(long, default_value = "schemas")]
        source_dir: String,
    },
}

fn main() -> miette::Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .format_timestamp(None)
        .init();

    match args.command {
        Command::Check { path } => commands::check::handle_check(path)?,
        Command::Types { path, json } => commands::types::handle_types(path, json)?,
        Command::New { path, source_dir } => commands::new::handle_new(path, &source_dir)?,
    }
    Ok(())
}
