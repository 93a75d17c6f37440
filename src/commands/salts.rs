use anyhow::{Context, Result};
use secrecy::ExposeSecret;
use tracing::info;

use crate::commands::env_for_write;
use crate::config::Options;
use crate::dotenv::file::EnvFile;
use crate::dotenv::line::Quote;
use crate::salts::{self, SaltProvider, SaltSet, SaltSource};

/// What happened when salts were written into a file.
#[derive(Debug, Default, PartialEq)]
pub struct SaltReport {
    pub set: usize,
    pub skipped: Vec<String>,
}

pub fn generate(
    opts: &Options,
    provider: &dyn SaltProvider,
    source: &dyn SaltSource,
) -> Result<()> {
    let mut env = env_for_write(opts)?;
    generate_into(&mut env, opts.force, provider, source)
}

pub fn regenerate(
    opts: &Options,
    provider: &dyn SaltProvider,
    source: &dyn SaltSource,
) -> Result<()> {
    let mut env = env_for_write(opts)?;
    let salts = salts::collect(provider, source)?;

    apply(&mut env, &salts, true)?;
    env.save().context("Failed to save environment file")?;

    println!("Success: Salts regenerated.");
    Ok(())
}

/// Collect salts and write the missing ones (all of them when `force`) to a
/// loaded env file, then save it once.
pub fn generate_into(
    env: &mut EnvFile,
    force: bool,
    provider: &dyn SaltProvider,
    source: &dyn SaltSource,
) -> Result<()> {
    let salts = salts::collect(provider, source)?;
    let report = apply(env, &salts, force)?;
    env.save().context("Failed to save environment file")?;

    for line in generate_messages(&report) {
        println!("{}", line);
    }
    Ok(())
}

/// What `salts generate` tells the user about a report.
pub fn generate_messages(report: &SaltReport) -> Vec<String> {
    let mut lines: Vec<String> = report
        .skipped
        .iter()
        .map(|key| format!("The '{}' already exists, skipping.", key))
        .collect();

    if report.skipped.is_empty() {
        lines.push("Success: Salts generated.".to_string());
        return lines;
    }
    if report.set > 0 {
        lines.push(format!("Success: {} salts set.", report.set));
    }
    lines.push("Some keys were already defined in the environment file.".to_string());
    lines.push("Use 'wp-dotenv salts regenerate' to update them.".to_string());
    lines
}

/// Set each salt single-quoted. Without `force`, keys that are already
/// defined keep their value.
pub fn apply(env: &mut EnvFile, salts: &SaltSet, force: bool) -> Result<SaltReport> {
    let mut report = SaltReport::default();

    for salt in salts.iter() {
        if !force && env.has_key(&salt.key)? {
            report.skipped.push(salt.key.clone());
            continue;
        }
        env.set(&salt.key, salt.value.expose_secret(), Quote::Single)?;
        report.set += 1;
    }

    info!(set = report.set, skipped = report.skipped.len(), "applied salts");
    Ok(report)
}
