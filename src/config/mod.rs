use crate::errors::{AppError, AppResult};
use crate::models::student::MAX_STUDENTS_LIMIT;
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub mod migrate;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_sheet_id")]
    pub sheet_id: String,
    #[serde(default = "default_sheet_name")]
    pub sheet_name: String,
    #[serde(default = "default_max_students")]
    pub max_students: u32,
    #[serde(default)]
    pub roster: Option<String>,
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,
    #[serde(default = "default_connect_retry")]
    pub connect_retry_ms: u64,
    #[serde(default = "default_post_scan_delay")]
    pub post_scan_delay_ms: u64,
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_sheet_id() -> String {
    "attendance".to_string()
}
fn default_sheet_name() -> String {
    "Sheet1".to_string()
}
fn default_max_students() -> u32 {
    5
}
fn default_poll_interval() -> u64 {
    100
}
fn default_connect_retry() -> u64 {
    5000
}
fn default_post_scan_delay() -> u64 {
    1000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            sheet_id: default_sheet_id(),
            sheet_name: default_sheet_name(),
            max_students: default_max_students(),
            roster: None,
            poll_interval_ms: default_poll_interval(),
            connect_retry_ms: default_connect_retry(),
            post_scan_delay_ms: default_post_scan_delay(),
            seed: None,
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rattendance")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".rattendance")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rattendance.conf")
    }

    /// Return the full path of the sheet database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rattendance.sqlite")
    }

    /// Database path for a `--db` override: `~/` is expanded and a relative
    /// name lands inside the configuration directory.
    pub fn resolve_db_path(name: &str) -> PathBuf {
        let p = expand_tilde(name);
        if p.is_absolute() {
            p
        } else {
            Self::config_dir().join(p)
        }
    }

    /// Config file in use: the `--config` override or the standard one.
    pub fn resolve_file(custom: Option<&str>) -> PathBuf {
        custom
            .map(expand_tilde)
            .unwrap_or_else(Self::config_file)
    }

    /// Load configuration from file, or return defaults if not found.
    pub fn load(custom: Option<&str>) -> AppResult<Self> {
        let path = Self::resolve_file(custom);

        if !path.exists() {
            return Ok(Config::default());
        }

        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        let mut cfg: Config = serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))?;
        cfg.database = expand_tilde(&cfg.database).to_string_lossy().to_string();
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> AppResult<()> {
        if self.max_students > MAX_STUDENTS_LIMIT {
            return Err(AppError::Config(format!(
                "max_students is {}, at most {} is supported",
                self.max_students, MAX_STUDENTS_LIMIT
            )));
        }
        Ok(())
    }

    pub fn save(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self).map_err(|_| AppError::ConfigSave)?;
        let mut file = fs::File::create(path)?;
        file.write_all(yaml.as_bytes())?;
        Ok(())
    }

    /// Initialize configuration and database files.
    ///
    /// A relative `custom_db` is placed inside the configuration directory.
    /// In test mode the configuration file is left untouched.
    pub fn init_all(
        custom_db: Option<&str>,
        config_path: Option<&str>,
        is_test: bool,
    ) -> AppResult<Config> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let mut config = Self::load(config_path)?;

        if let Some(name) = custom_db {
            config.database = Self::resolve_db_path(name).to_string_lossy().to_string();
        }

        if !is_test {
            let file = Self::resolve_file(config_path);
            config.save(&file)?;
            println!("✅ Config file: {:?}", file);
        }

        let db_path = PathBuf::from(&config.database);
        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }
        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        println!("✅ Database:    {:?}", db_path);

        Ok(config)
    }
}
