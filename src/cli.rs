//! Command-line interface for craft.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, Args as ClapArgs, CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments structure for craft.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "craft: scaffold new projects from embedded templates",
    long_about = None
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new project
    New(NewArgs),
}

#[derive(ClapArgs, Debug)]
pub struct NewArgs {
    /// Language of the project (go, rust, java)
    #[arg(value_name = "LANGUAGE")]
    pub language: String,

    /// Name of the project; a directory with this name is created
    #[arg(
        short,
        long,
        conflicts_with = "current_dir_name",
        required_unless_present = "current_dir_name"
    )]
    pub name: Option<String>,

    /// Use the current directory's name as the project name and generate into it
    #[arg(short, long)]
    pub current_dir_name: bool,

    /// Dependencies selecting the build tool and framework, e.g. `-d maven -d quarkus`
    #[arg(
        short,
        long = "dependencies",
        value_name = "DEPENDENCY",
        value_delimiter = ','
    )]
    pub dependencies: Vec<String>,

    /// Read templates from this directory instead of the embedded ones
    #[arg(long, value_name = "DIR")]
    pub templates: Option<PathBuf>,

    /// Kill the external generator if it runs longer than this many seconds
    #[arg(long, value_name = "SECS")]
    pub generator_timeout: Option<u64>,
}

/// Parses command line arguments and returns the Args structure.
///
/// # Returns
/// * `Args` - Parsed command line arguments
///
/// # Exits
/// * With status code 1 if required arguments are missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if matches!(
                e.kind(),
                ErrorKind::MissingRequiredArgument
                    | ErrorKind::MissingSubcommand
                    | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            ) {
                let _ = Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}
