//! Runtime configuration.
//!
//! # Responsibility
//! - Resolve the data directory, log level and storage quota.
//! - Build the storage connection callers hand to repositories.
//!
//! # Invariants
//! - Precedence is defaults < `config.json` in the data dir < environment.
//! - `data_dir` is absolute whatever its source; relative values resolve
//!   against the working directory.
//! - Derived paths always live under `data_dir`.

use crate::db::{open_db, DbResult};
use crate::logging::default_log_level;
use crate::repo::task_repo::KeyValueTaskRepository;
use crate::storage::SqliteKeyValueStore;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const ENV_HOME: &str = "TASKBOARD_HOME";
pub const ENV_LOG_LEVEL: &str = "TASKBOARD_LOG_LEVEL";
pub const ENV_STORAGE_QUOTA: &str = "TASKBOARD_STORAGE_QUOTA";

const CONFIG_FILE_NAME: &str = "config.json";
const DB_FILE_NAME: &str = "taskboard.sqlite3";
const LOG_DIR_NAME: &str = "logs";
const DEFAULT_DIR_NAME: &str = ".taskboard";

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug)]
pub enum ConfigError {
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    InvalidValue {
        name: &'static str,
        value: String,
    },
    /// No explicit data dir and no home directory to derive one from.
    NoDataDir,
    /// A relative data dir could not be anchored to the working directory.
    WorkingDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "invalid config `{}`: {source}", path.display())
            }
            Self::InvalidValue { name, value } => write!(f, "invalid value `{value}` for {name}"),
            Self::NoDataDir => write!(
                f,
                "cannot resolve data directory; set {ENV_HOME} or pass one explicitly"
            ),
            Self::WorkingDir { path, source } => write!(
                f,
                "cannot resolve relative data directory `{}`: {source}",
                path.display()
            ),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::WorkingDir { source, .. } => Some(source),
            Self::InvalidValue { .. } | Self::NoDataDir => None,
        }
    }
}

/// Optional overrides read from `config.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub log_level: Option<String>,
    #[serde(default)]
    pub storage_quota_bytes: Option<usize>,
}

impl ConfigFile {
    /// Loads `path`, returning defaults when the file does not exist.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskboardConfig {
    pub data_dir: PathBuf,
    pub log_level: String,
    /// `None` means unlimited.
    pub storage_quota_bytes: Option<usize>,
}

impl TaskboardConfig {
    /// Defaults rooted at `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            log_level: default_log_level().to_string(),
            storage_quota_bytes: None,
        }
    }

    /// Resolves configuration from the process environment.
    ///
    /// `data_dir` wins over `TASKBOARD_HOME`, which wins over `~/.taskboard`.
    pub fn load(data_dir: Option<PathBuf>) -> ConfigResult<Self> {
        Self::load_with(data_dir, |name| std::env::var(name).ok())
    }

    /// Same as [`TaskboardConfig::load`] with an injectable `TASKBOARD_*` lookup.
    ///
    /// The home directory fallback always comes from [`dirs::home_dir`].
    pub fn load_with<F>(data_dir: Option<PathBuf>, env: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = resolve_data_dir(data_dir, env(ENV_HOME), dirs::home_dir())?;

        let mut config = Self::new(data_dir);
        let file = ConfigFile::load(&config.config_path())?;
        if let Some(level) = file.log_level {
            config.log_level = level;
        }
        if file.storage_quota_bytes.is_some() {
            config.storage_quota_bytes = file.storage_quota_bytes;
        }

        if let Some(level) = env(ENV_LOG_LEVEL).filter(|v| !v.trim().is_empty()) {
            config.log_level = level;
        }
        if let Some(raw) = env(ENV_STORAGE_QUOTA).filter(|v| !v.trim().is_empty()) {
            let quota = raw
                .trim()
                .parse::<usize>()
                .map_err(|_| ConfigError::InvalidValue {
                    name: ENV_STORAGE_QUOTA,
                    value: raw.clone(),
                })?;
            config.storage_quota_bytes = Some(quota);
        }

        Ok(config)
    }

    pub fn config_path(&self) -> PathBuf {
        self.data_dir.join(CONFIG_FILE_NAME)
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE_NAME)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join(LOG_DIR_NAME)
    }

    /// Opens the migrated database under the data dir.
    pub fn open_storage(&self) -> DbResult<Connection> {
        open_db(self.db_path())
    }

    /// Builds the default task repository over an open connection.
    pub fn task_repository<'conn>(
        &self,
        conn: &'conn Connection,
    ) -> KeyValueTaskRepository<SqliteKeyValueStore<'conn>> {
        let store = SqliteKeyValueStore::new(conn).with_quota(self.storage_quota_bytes);
        KeyValueTaskRepository::new(store)
    }
}

/// Picks the data dir (explicit, then `TASKBOARD_HOME`, then `<home>/.taskboard`)
/// and anchors a relative choice to the working directory.
fn resolve_data_dir(
    explicit: Option<PathBuf>,
    env_home: Option<String>,
    home_dir: Option<PathBuf>,
) -> ConfigResult<PathBuf> {
    let data_dir = explicit
        .or_else(|| env_home.filter(|v| !v.trim().is_empty()).map(PathBuf::from))
        .or_else(|| home_dir.map(|home| home.join(DEFAULT_DIR_NAME)))
        .ok_or(ConfigError::NoDataDir)?;

    if data_dir.is_absolute() {
        return Ok(data_dir);
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(&data_dir))
        .map_err(|source| ConfigError::WorkingDir {
            path: data_dir,
            source,
        })
}
