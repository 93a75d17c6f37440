use anyhow::Result;

use crate::commands::env_for_read;
use crate::config::Options;
use crate::error::DotenvError;

pub fn run(opts: &Options, key: &str) -> Result<()> {
    let env = env_for_read(opts)?;

    match env.get(key)? {
        Some(value) => println!("{}", value),
        None => return Err(DotenvError::KeyNotFound(key.to_string()).into()),
    }

    Ok(())
}
