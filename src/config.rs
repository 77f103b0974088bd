use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{DocVersionsError, Result};
use crate::lifecycle::{PublishPolicy, MAX_PRERELEASES};

/// Name of the project-local configuration file
pub const CONFIG_FILE_NAME: &str = "docversions.toml";

/// Complete configuration for doc-versions.
///
/// Built once at startup from the configuration file, then overridden by
/// command line flags and their environment variables. Never mutated afterwards.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub publish: PublishConfig,

    #[serde(default)]
    pub index: IndexConfig,
}

fn default_version_dir() -> PathBuf {
    PathBuf::from("version")
}

fn default_index_file() -> PathBuf {
    PathBuf::from("versions.json")
}

fn default_index_html() -> PathBuf {
    PathBuf::from("index.html")
}

fn default_max_prereleases() -> usize {
    MAX_PRERELEASES
}

fn default_render_last() -> usize {
    3
}

/// Locations of the published documentation state
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PathsConfig {
    #[serde(default = "default_version_dir")]
    pub version_dir: PathBuf,

    #[serde(default = "default_index_file")]
    pub index_file: PathBuf,

    #[serde(default = "default_index_html")]
    pub index_html: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        PathsConfig {
            version_dir: default_version_dir(),
            index_file: default_index_file(),
            index_html: default_index_html(),
        }
    }
}

/// Publish policy settings
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PublishConfig {
    #[serde(default)]
    pub independent_patch_release: bool,

    #[serde(default = "default_max_prereleases")]
    pub max_prereleases: usize,
}

impl Default for PublishConfig {
    fn default() -> Self {
        PublishConfig {
            independent_patch_release: false,
            max_prereleases: default_max_prereleases(),
        }
    }
}

/// Version switcher settings
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct IndexConfig {
    /// Documentation host, e.g. `docs.example.com`
    #[serde(default)]
    pub cname: Option<String>,

    #[serde(default = "default_render_last")]
    pub render_last: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        IndexConfig {
            cname: None,
            render_last: default_render_last(),
        }
    }
}

/// Values supplied on the command line or through the environment
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub version_dir: Option<PathBuf>,
    pub index_file: Option<PathBuf>,
    pub index_html: Option<PathBuf>,
    pub independent_patch_release: Option<bool>,
    pub cname: Option<String>,
    pub render_last: Option<usize>,
}

impl Config {
    /// Apply command line and environment overrides on top of file values
    pub fn with_overrides(mut self, overrides: &Overrides) -> Self {
        if let Some(dir) = &overrides.version_dir {
            self.paths.version_dir = dir.clone();
        }
        if let Some(file) = &overrides.index_file {
            self.paths.index_file = file.clone();
        }
        if let Some(html) = &overrides.index_html {
            self.paths.index_html = html.clone();
        }
        if let Some(independent) = overrides.independent_patch_release {
            self.publish.independent_patch_release = independent;
        }
        if let Some(cname) = &overrides.cname {
            self.index.cname = Some(cname.clone());
        }
        if let Some(render_last) = overrides.render_last {
            self.index.render_last = render_last;
        }
        self
    }

    /// Reject settings no run could work with
    pub fn validate(&self) -> Result<()> {
        if self.publish.max_prereleases == 0 {
            return Err(DocVersionsError::config(
                "publish.max_prereleases must be at least 1",
            ));
        }
        if self.index.render_last == 0 {
            return Err(DocVersionsError::config(
                "index.render_last must be at least 1",
            ));
        }
        Ok(())
    }

    /// Documentation host, required by index and announcement runs
    pub fn cname(&self) -> Result<&str> {
        match self.index.cname.as_deref().map(str::trim) {
            Some(cname) if !cname.is_empty() => Ok(cname),
            _ => Err(DocVersionsError::config(
                "No documentation host configured (set --cname, CNAME or index.cname)",
            )),
        }
    }

    pub fn policy(&self) -> PublishPolicy {
        PublishPolicy {
            independent_patch_release: self.publish.independent_patch_release,
            max_prereleases: self.publish.max_prereleases,
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `docversions.toml` in current directory
/// 3. `.docversions.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new(CONFIG_FILE_NAME).exists() {
        fs::read_to_string(CONFIG_FILE_NAME)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(format!(".{}", CONFIG_FILE_NAME));
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)?;
    Ok(config)
}
