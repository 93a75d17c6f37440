use anyhow::{Context, Result};

use crate::commands::env_for_write;
use crate::config::Options;
use crate::dotenv::file::EnvFile;

pub fn run(opts: &Options, keys: &[String]) -> Result<()> {
    let mut env = env_for_write(opts)?;

    for (key, removed) in remove_keys(&mut env, keys)? {
        if removed > 0 {
            println!("Success: Removed '{}'.", key);
        } else {
            eprintln!("Warning: No line found for key: '{}'.", key);
        }
    }

    env.save().context("Failed to save environment file")?;
    Ok(())
}

/// Remove each key in memory, returning how many lines each one removed.
pub fn remove_keys<'k>(env: &mut EnvFile, keys: &'k [String]) -> Result<Vec<(&'k str, usize)>> {
    keys.iter()
        .map(|key| -> Result<(&'k str, usize)> { Ok((key.as_str(), env.remove(key)?)) })
        .collect()
}
