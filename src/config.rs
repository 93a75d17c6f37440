use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::dotenv::file::resolve_path;
use crate::dotenv::line::Quote;
use crate::error::DotenvError;
use crate::output::{Field, Format};
use crate::salts::remote::{HttpSaltSource, DEFAULT_SALTS_URL, DEFAULT_TIMEOUT_SECS};

const SETTINGS_FILE: &str = "wp-dotenv.toml";
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Project defaults read from `wp-dotenv.toml`. Every field is optional.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Env file used when `--file` is not given.
    pub file: Option<PathBuf>,
    pub salts: SaltSettings,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SaltSettings {
    pub url: String,
    pub timeout_secs: u64,
}

impl Default for SaltSettings {
    fn default() -> Self {
        Self {
            url: DEFAULT_SALTS_URL.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Settings {
    pub fn salt_source(&self) -> HttpSaltSource {
        HttpSaltSource::new(
            self.salts.url.clone(),
            Duration::from_secs(self.salts.timeout_secs),
        )
    }
}

/// Returns the settings file path for a given project root.
pub fn settings_path(project_root: &Path) -> PathBuf {
    project_root.join(SETTINGS_FILE)
}

/// Read settings from the given project root. A missing file yields defaults.
pub fn read(project_root: &Path) -> Result<Settings, DotenvError> {
    let path = settings_path(project_root);
    if !path.exists() {
        return Ok(Settings::default());
    }
    let raw = std::fs::read_to_string(&path)?;
    toml::from_str(&raw).map_err(|e| DotenvError::Config(format!("{}: {}", path.display(), e)))
}

/// Returns the current project root (cwd).
pub fn project_root() -> Result<PathBuf, DotenvError> {
    std::env::current_dir().map_err(DotenvError::Io)
}

/// Everything a command may be told on the command line.
#[derive(Debug, Clone)]
pub struct Options {
    pub file: PathBuf,
    pub fields: Vec<Field>,
    pub keys: Vec<String>,
    pub force: bool,
    pub interactive: bool,
    pub template: Option<PathBuf>,
    pub quote: Quote,
    pub format: Format,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            file: PathBuf::from(DEFAULT_ENV_FILE),
            fields: vec![Field::Key, Field::Value],
            keys: Vec::new(),
            force: false,
            interactive: false,
            template: None,
            quote: Quote::None,
            format: Format::Table,
        }
    }
}

impl Options {
    /// Options targeting `--file` if given, else the settings file's choice,
    /// else `.env`.
    pub fn for_file(cli_file: Option<PathBuf>, settings: &Settings) -> Self {
        let file = cli_file
            .or_else(|| settings.file.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ENV_FILE));
        Self {
            file,
            ..Self::default()
        }
    }

    /// Absolute path of the target env file.
    pub fn resolve_file(&self) -> Result<PathBuf, DotenvError> {
        self.resolve(&self.file)
    }

    /// Absolute form of `path` relative to the working directory.
    pub fn resolve(&self, path: &Path) -> Result<PathBuf, DotenvError> {
        Ok(resolve_path(&project_root()?, path))
    }
}
