//! Run configuration.
//!
//! Properties are looked up through a [`PropertySource`] once at the start of
//! a run, validated into [`ReportConfig`] or [`SyncConfig`], and then handed
//! to the pipelines explicitly.

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub const TODOIST_API_TOKEN: &str = "TODOIST_API_TOKEN";
pub const GOOGLE_ACCESS_TOKEN: &str = "GOOGLE_ACCESS_TOKEN";
pub const REPORT_FOLDER_ID: &str = "REPORT_FOLDER_ID";
pub const TASK_LIST_NAME: &str = "TASK_LIST_NAME";

const CONFIG_NAMESPACE: &str = "taskbridge";
const CONFIG_FILENAME: &str = "taskbridge.toml";

/// Key-value lookup for string properties.
pub trait PropertySource {
    /// Raw value for `key`, if present.
    fn lookup(&self, key: &str) -> Option<String>;

    /// Value for `key`, trimmed; blank values count as absent.
    fn property(&self, key: &str) -> Option<String> {
        self.lookup(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn require(&self, key: &str) -> Result<String> {
        self.property(key).ok_or_else(|| Error::missing(key))
    }
}

/// Reads properties from the process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvProperties;

impl PropertySource for EnvProperties {
    fn lookup(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// In-memory properties.
#[derive(Debug, Default, Clone)]
pub struct MapProperties {
    values: HashMap<String, String>,
}

impl MapProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }
}

impl PropertySource for MapProperties {
    fn lookup(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

/// Flat table of string properties loaded from a TOML file.
///
/// ```toml
/// TODOIST_API_TOKEN = "..."
/// REPORT_FOLDER_ID = "..."
/// ```
#[derive(Debug, Default, Clone)]
pub struct FileProperties {
    inner: MapProperties,
    path: PathBuf,
}

impl FileProperties {
    /// Load `path`. A missing file yields an empty set of properties.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config file at {}", path.display());
            return Ok(Self {
                inner: MapProperties::new(),
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| Error::ConfigFile {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::parse(&content, path)
    }

    fn parse(content: &str, path: &Path) -> Result<Self> {
        let table: toml::Table = toml::from_str(content).map_err(|e| Error::ConfigFile {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let mut inner = MapProperties::new();
        for (key, value) in table {
            match value {
                toml::Value::String(s) => {
                    inner.values.insert(key, s);
                }
                other => {
                    return Err(Error::ConfigFile {
                        path: path.to_path_buf(),
                        message: format!("property {} must be a string, found {}", key, other.type_str()),
                    });
                }
            }
        }

        Ok(Self {
            inner,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `$XDG_CONFIG_HOME/taskbridge/taskbridge.toml` or its platform equivalent.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_NAMESPACE).join(CONFIG_FILENAME))
    }
}

impl PropertySource for FileProperties {
    fn lookup(&self, key: &str) -> Option<String> {
        self.inner.lookup(key)
    }
}

/// Chains sources; the first one holding a non-blank value wins.
#[derive(Default)]
pub struct LayeredProperties {
    layers: Vec<Box<dyn PropertySource>>,
}

impl LayeredProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn layer<P: PropertySource + 'static>(mut self, source: P) -> Self {
        self.layers.push(Box::new(source));
        self
    }

    /// Environment first, then the properties file at `path` (or the default location).
    pub fn standard(path: Option<&Path>) -> Result<Self> {
        let mut layered = Self::new().layer(EnvProperties);
        let file_path = match path {
            Some(p) => Some(p.to_path_buf()),
            None => FileProperties::default_path(),
        };
        if let Some(file_path) = file_path {
            layered = layered.layer(FileProperties::load(&file_path)?);
        }
        Ok(layered)
    }
}

impl PropertySource for LayeredProperties {
    fn lookup(&self, key: &str) -> Option<String> {
        self.layers.iter().find_map(|layer| layer.property(key))
    }
}

/// Settings for the Todoist report run.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub todoist_token: String,
    pub google_token: String,
    pub folder_id: String,
}

impl ReportConfig {
    pub fn from_properties(props: &dyn PropertySource) -> Result<Self> {
        Ok(Self {
            todoist_token: props.require(TODOIST_API_TOKEN)?,
            google_token: props.require(GOOGLE_ACCESS_TOKEN)?,
            folder_id: props.require(REPORT_FOLDER_ID)?,
        })
    }
}

/// Settings for the Google Tasks to Todoist run.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub todoist_token: String,
    pub google_token: String,
    pub task_list_name: String,
}

impl SyncConfig {
    pub fn from_properties(props: &dyn PropertySource) -> Result<Self> {
        Ok(Self {
            todoist_token: props.require(TODOIST_API_TOKEN)?,
            google_token: props.require(GOOGLE_ACCESS_TOKEN)?,
            task_list_name: props.require(TASK_LIST_NAME)?,
        })
    }
}
