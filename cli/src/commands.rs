pub mod add;
pub mod list;
pub mod select;

use std::io::Write;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use routes_common::config::{Config, DEFAULT_LOG_FILE};

use crate::datafile::DataFile;

#[derive(Parser)]
#[command(name = "routes")]
#[command(version)]
#[command(about = "Keeps a list of routes in a JSON file.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Append timestamped log lines to this file
    #[arg(long, global = true, env = "ROUTES_LOG_FILE", default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,

    /// Only print errors to the console
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Args, Debug)]
pub struct FileArgs {
    /// Resolve the file against the user's home directory
    #[arg(long)]
    pub home: bool,

    /// The data file name
    pub filename: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a new route
    #[command(alias = "a")]
    Add {
        /// The route start
        #[arg(short, long)]
        start: String,
        /// The route endpoint
        #[arg(short, long)]
        end: String,
        /// The number of the route
        #[arg(short, long, allow_negative_numbers = true)]
        number: i64,
        #[command(flatten)]
        file: FileArgs,
    },
    /// Display all routes
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        file: FileArgs,
    },
    /// Select the routes starting or ending at a point
    #[command(alias = "s")]
    Select {
        /// Routes starting or ending at this point
        #[arg(short, long)]
        point: String,
        #[command(flatten)]
        file: FileArgs,
    },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn config(&self) -> Config {
        Config {
            log_file: self.log_file.clone(),
            quiet: self.quiet,
        }
    }
}

/// Runs a parsed command, writing tables to `out`.
pub fn execute(command: Commands, out: &mut impl Write) -> anyhow::Result<()> {
    match command {
        Commands::Add {
            start,
            end,
            number,
            file,
        } => add::add(&DataFile::resolve(&file)?, &start, &end, number),
        Commands::List { file } => list::list(&DataFile::resolve(&file)?, out),
        Commands::Select { point, file } => select::select(&DataFile::resolve(&file)?, &point, out),
    }
}
