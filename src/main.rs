mod cli;
mod commands;
mod config;
mod dotenv;
mod error;
mod logging;
mod output;
mod prompt;
mod salts;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command, SaltsCommand};
use config::Options;
use salts::random::RandomSaltProvider;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    let settings = config::read(&config::project_root()?)?;
    let mut opts = Options::for_file(cli.file, &settings);
    let provider = RandomSaltProvider;
    let source = settings.salt_source();

    match cli.command {
        Command::Init {
            template,
            interactive,
            with_salts,
            force,
        } => {
            opts.template = template;
            opts.interactive = interactive;
            opts.force = force;
            commands::init::run(&opts, with_salts, &provider, &source)?
        }
        Command::Set { key, value, quote } => {
            opts.quote = quote;
            commands::set::run(&opts, &key, &value)?
        }
        Command::Get { key } => commands::get::run(&opts, &key)?,
        Command::Delete { keys } => commands::delete::run(&opts, &keys)?,
        Command::List {
            keys,
            fields,
            format,
        } => {
            opts.keys = keys;
            opts.fields = fields;
            opts.format = format;
            commands::list::run(&opts)?
        }
        Command::Salts { command } => match command {
            SaltsCommand::Generate { force } => {
                opts.force = force;
                commands::salts::generate(&opts, &provider, &source)?
            }
            SaltsCommand::Regenerate => commands::salts::regenerate(&opts, &provider, &source)?,
        },
    }

    Ok(())
}
