//! Command-line interface for crispin.
//! Provides argument parsing using clap.

use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments structure for crispin.
#[derive(Parser, Debug)]
#[command(author, version, about = "crispin: kickstarts from reusable templates, served over iPXE", long_about = None)]
pub struct Args {
    /// Increase logging verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a blank answer file or a kickstart from a recipe
    #[command(group(ArgGroup::new("mode").required(true).args(["generate_answers", "answers"])))]
    Generate {
        /// Path of the recipe
        #[arg(short, long)]
        recipe: PathBuf,

        /// Name of the generated kickstart or answer file, without extension
        #[arg(short, long)]
        name: String,

        /// Generate a blank answer file for the recipe
        #[arg(short, long)]
        generate_answers: bool,

        /// Answers used to fill in the kickstart
        #[arg(short, long)]
        answers: Option<PathBuf>,

        /// Directory the output is written to, created if missing
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,

        /// Directory holding the recipe's templates.
        /// Defaults to the `templates` directory of the recipe's cookbook.
        #[arg(short, long)]
        template_dir: Option<PathBuf>,

        /// Append a log destination to every %pre and %post section
        #[arg(long)]
        ks_logging: bool,
    },

    /// Print the kickstart for a stored answer file
    Get {
        /// Answer file name, without extension
        name: String,

        /// Cookbook directory
        #[arg(short, long, default_value = ".")]
        cookbook: PathBuf,
    },

    /// Print the iPXE boot menu for the cookbook's answer files
    Menu {
        /// Hostname booting targets reach the kickstart server at
        #[arg(long)]
        hostname: Option<String>,

        /// Port of the kickstart server
        #[arg(long)]
        port: Option<u16>,

        /// Cookbook directory
        #[arg(short, long, default_value = ".")]
        cookbook: PathBuf,
    },
}
