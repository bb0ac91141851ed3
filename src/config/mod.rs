use crate::errors::{AppError, AppResult};
use crate::source::WarehouseSchema;
use crate::utils::path::expand_tilde;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_table")]
    pub table: String,
    #[serde(default = "default_task_column")]
    pub task_column: String,
    #[serde(default = "default_date_column")]
    pub date_column: String,
    #[serde(default = "default_start")]
    pub default_start: NaiveDate,
    #[serde(default = "default_min_date")]
    pub min_date: NaiveDate,
    #[serde(default)]
    pub chart: ChartConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

/// Chart geometry and terminal bar styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    /// Stretch the HTML chart to the container width.
    #[serde(default = "default_true")]
    pub responsive: bool,
    #[serde(default = "default_bar_char")]
    pub bar_char: String,
    #[serde(default = "default_max_bar_width")]
    pub max_bar_width: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_cache_entries")]
    pub max_entries: u64,
    /// `None` keeps entries for the whole session.
    #[serde(default)]
    pub ttl_seconds: Option<u64>,
}

fn default_table() -> String {
    "tasks".to_string()
}
fn default_task_column() -> String {
    "TASK_NAME".to_string()
}
fn default_date_column() -> String {
    "COMPLETION_DATE".to_string()
}
fn default_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 2, 1).unwrap_or_default()
}
fn default_min_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or_default()
}
fn default_width() -> u32 {
    700
}
fn default_height() -> u32 {
    400
}
fn default_true() -> bool {
    true
}
fn default_bar_char() -> String {
    "█".to_string()
}
fn default_max_bar_width() -> usize {
    50
}
fn default_cache_entries() -> u64 {
    64
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            responsive: default_true(),
            bar_char: default_bar_char(),
            max_bar_width: default_max_bar_width(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: default_cache_entries(),
            ttl_seconds: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let db_path = Self::database_file();
        Self {
            database: db_path.to_string_lossy().to_string(),
            table: default_table(),
            task_column: default_task_column(),
            date_column: default_date_column(),
            default_start: default_start(),
            min_date: default_min_date(),
            chart: ChartConfig::default(),
            cache: CacheConfig::default(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("taskchart")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".taskchart")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("taskchart.conf")
    }

    /// Return the default path of the warehouse database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("warehouse.sqlite")
    }

    /// Load a configuration file, or defaults if not found
    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("cannot read {}: {e}", path.display())))?;
        let cfg = Self::from_yaml(&content)
            .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))?;

        debug!(path = %path.display(), database = %cfg.database, "config loaded");
        Ok(cfg)
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        let mut cfg: Config = serde_yaml::from_str(content)?;
        cfg.database = expand_tilde(&cfg.database).to_string_lossy().to_string();
        Ok(cfg)
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        serde_yaml::to_string(self).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Table and column names as validated identifiers.
    pub fn schema(&self) -> AppResult<WarehouseSchema> {
        WarehouseSchema::new(&self.table, &self.task_column, &self.date_column)
    }

    /// Reject settings the dashboard cannot run with.
    pub fn validate(&self, today: NaiveDate) -> AppResult<()> {
        self.schema()?;

        if self.min_date > today {
            return Err(AppError::Config(format!(
                "min_date {} is in the future (today is {today})",
                self.min_date
            )));
        }
        if self.cache.max_entries == 0 {
            return Err(AppError::Config(
                "cache.max_entries must be at least 1".to_string(),
            ));
        }
        if self.chart.width == 0 || self.chart.height == 0 {
            return Err(AppError::Config(
                "chart width and height must be positive".to_string(),
            ));
        }
        if self.chart.bar_char.is_empty() {
            return Err(AppError::Config("chart.bar_char is empty".to_string()));
        }
        Ok(())
    }

    /// Write the configuration file and create the warehouse file.
    ///
    /// With `is_test` the config file is left alone and only the database
    /// is prepared.
    pub fn init_all(custom_db: Option<&str>, config_path: &Path, is_test: bool) -> AppResult<Self> {
        let dir = config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::config_dir);
        fs::create_dir_all(&dir)?;

        let db_path = match custom_db {
            Some(name) => {
                let p = expand_tilde(name);
                if p.is_absolute() { p } else { dir.join(p) }
            }
            None => dir.join("warehouse.sqlite"),
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Self::default()
        };

        if !is_test {
            let yaml = config.to_yaml()?;
            let mut file = fs::File::create(config_path)?;
            file.write_all(yaml.as_bytes())?;
            println!("✅ Config file: {}", config_path.display());
        }

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }

        Ok(config)
    }
}
