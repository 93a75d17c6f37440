pub mod delete;
pub mod get;
pub mod init;
pub mod list;
pub mod salts;
pub mod set;

use anyhow::{Context, Result};

use crate::config::Options;
use crate::dotenv::file::EnvFile;

/// Load the target env file, which must be readable.
fn env_for_read(opts: &Options) -> Result<EnvFile> {
    let mut env = EnvFile::at(opts.resolve_file()?)?;
    env.load().context("Failed to read environment file")?;
    Ok(env)
}

/// Load the target env file, which must be readable and writable.
fn env_for_write(opts: &Options) -> Result<EnvFile> {
    let mut env = EnvFile::writable(opts.resolve_file()?)?;
    env.load().context("Failed to read environment file")?;
    Ok(env)
}
