use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::commands::salts::generate_into;
use crate::config::Options;
use crate::dotenv::file::EnvFile;
use crate::dotenv::line::Line;
use crate::error::DotenvError;
use crate::prompt::{Prompter, StdinPrompter};
use crate::salts::{SaltProvider, SaltSource};

pub fn run(
    opts: &Options,
    with_salts: bool,
    provider: &dyn SaltProvider,
    source: &dyn SaltSource,
) -> Result<()> {
    let path = opts.resolve_file()?;
    let template = opts.template.as_deref().map(|t| opts.resolve(t)).transpose()?;

    let mut env = initialize(&path, template.as_deref(), opts, &mut StdinPrompter)?;

    if with_salts {
        env.load()?;
        generate_into(&mut env, false, provider, source)?;
    }

    println!("Success: {} created.", path.display());
    Ok(())
}

/// Create the env file, optionally seeded from a template and, when
/// interactive, with each templated value confirmed or replaced by the user.
pub fn initialize(
    path: &Path,
    template: Option<&Path>,
    opts: &Options,
    prompter: &mut dyn Prompter,
) -> Result<EnvFile> {
    if path.exists() && !opts.force {
        return Err(DotenvError::FileAlreadyExists(path.to_path_buf()).into());
    }

    let mut env = EnvFile::create(path)
        .with_context(|| format!("Failed to create environment file at: {}", path.display()))?;
    if !env.is_writable() {
        return Err(DotenvError::FileNotWritable(path.to_path_buf()).into());
    }

    let Some(template) = template else {
        return Ok(env);
    };

    let template = EnvFile::at(template)
        .with_context(|| format!("Template file is not readable at: {}", template.display()))?;
    if template.path() == env.path() {
        bail!("The template and the environment file are the same file.");
    }

    println!("Initializing from template: {}", template.path().display());
    std::fs::copy(template.path(), env.path()).context("Failed to copy template")?;

    if opts.interactive {
        env.load()?;
        println!();
        println!("Interactive init");
        println!("Specify a new value for each key, or leave blank to keep the current value.");
        println!();
        prompt_all(&mut env, prompter)?;
        env.save().context("Failed to save environment file")?;
    }

    Ok(env)
}

/// Ask for a new value for every defined key. Blank answers keep the current
/// value; replaced values keep the quoting of the line they replace.
/// Returns how many values changed.
pub fn prompt_all(env: &mut EnvFile, prompter: &mut dyn Prompter) -> Result<usize> {
    let mut changed = 0;

    for (key, current) in env.dictionary()?.iter() {
        let answer = prompter
            .prompt(key, current)
            .context("Failed to read answer")?;
        if answer.is_empty() || answer == current {
            continue;
        }

        let quote = env.find(key)?.map(Line::quote).unwrap_or_default();
        env.set(key, &answer, quote)?;
        changed += 1;
    }

    Ok(changed)
}
