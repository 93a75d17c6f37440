use anyhow::{Context, Result};
use tracing::info;

use crate::commands::env_for_write;
use crate::config::Options;

pub fn run(opts: &Options, key: &str, value: &str) -> Result<()> {
    let mut env = env_for_write(opts)?;

    env.set(key, value, opts.quote)?;
    env.save().context("Failed to save environment file")?;

    info!(key, lines = env.size()?, path = %env.path().display(), "value set");
    println!("Success: '{}' set.", key);
    Ok(())
}
