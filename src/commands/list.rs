use anyhow::Result;

use crate::commands::env_for_read;
use crate::config::Options;
use crate::output;

pub fn run(opts: &Options) -> Result<()> {
    let env = env_for_read(opts)?;

    let mut dictionary = env.dictionary()?;
    if !opts.keys.is_empty() {
        dictionary = dictionary.only(opts.keys.as_slice());
    }

    print!("{}", output::render(&dictionary, &opts.fields, opts.format)?);
    Ok(())
}
