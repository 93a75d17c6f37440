use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use crate::dotenv::line::Quote;
use crate::output::{Field, Format};

#[derive(Parser, Debug)]
#[command(
    name = "wp-dotenv",
    about = "Manage a .env file and the WordPress salts it defines.",
    version
)]
pub struct Cli {
    /// Path to the environment file. Default: .env
    #[arg(long, global = true, env = "WP_DOTENV_FILE")]
    pub file: Option<PathBuf>,

    /// Log more detail to stderr (-v, -vv, -vvv).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Silence all log output.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the environment file.
    Init {
        /// Copy this file as the starting content.
        #[arg(long)]
        template: Option<PathBuf>,

        /// Prompt for a new value for every definition copied from the template.
        #[arg(long, requires = "template")]
        interactive: bool,

        /// Also generate and define the WordPress salts.
        #[arg(long)]
        with_salts: bool,

        /// Overwrite the file if it already exists.
        #[arg(long)]
        force: bool,
    },

    /// Set a value, updating an existing definition or adding a new one.
    Set {
        /// The variable name.
        key: String,

        /// The value to set.
        value: String,

        /// Quote style to wrap the value with.
        #[arg(long, value_enum, default_value_t = Quote::None)]
        quote: Quote,
    },

    /// Print the value of a variable.
    Get {
        /// The variable name.
        key: String,
    },

    /// Remove one or more definitions.
    Delete {
        /// The variable names to remove.
        #[arg(required = true)]
        keys: Vec<String>,
    },

    /// List the defined variables.
    List {
        /// Only list these keys (comma-separated).
        #[arg(long, value_delimiter = ',')]
        keys: Vec<String>,

        /// Columns to show (comma-separated).
        #[arg(long, value_enum, value_delimiter = ',', default_values_t = [Field::Key, Field::Value])]
        fields: Vec<Field>,

        /// Output format.
        #[arg(long, value_enum, default_value_t = Format::Table)]
        format: Format,
    },

    /// Manage the WordPress salts.
    Salts {
        #[command(subcommand)]
        command: SaltsCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum SaltsCommand {
    /// Define any salts missing from the environment file.
    Generate {
        /// Overwrite salts that are already defined.
        #[arg(long)]
        force: bool,
    },

    /// Replace every salt with a fresh value.
    Regenerate,
}
