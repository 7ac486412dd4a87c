//! # Configuration
//!
//! Settings live in `config.json` inside the studentdb home directory
//! (`$STUDENTDB_HOME`, or the current directory when unset).
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `database` | `StudentDB.sqlite` | SQLite file holding the `Students` table |
//! | `import-file` | `students.csv` | CSV read by `import` when no path is given |
//!
//! Relative paths are resolved against the home directory.

use crate::error::{Result, StudentError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
pub const DEFAULT_DATABASE: &str = "StudentDB.sqlite";
pub const DEFAULT_IMPORT_FILE: &str = "students.csv";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StudentDbConfig {
    #[serde(default = "default_database")]
    pub database: String,

    #[serde(default = "default_import_file")]
    pub import_file: String,
}

fn default_database() -> String {
    DEFAULT_DATABASE.to_string()
}

fn default_import_file() -> String {
    DEFAULT_IMPORT_FILE.to_string()
}

impl Default for StudentDbConfig {
    fn default() -> Self {
        Self {
            database: default_database(),
            import_file: default_import_file(),
        }
    }
}

/// Keys accepted by `studentdb config`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    Database,
    ImportFile,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 2] = [ConfigKey::Database, ConfigKey::ImportFile];

    pub fn name(&self) -> &'static str {
        match self {
            ConfigKey::Database => "database",
            ConfigKey::ImportFile => "import-file",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "database" | "db" => Ok(ConfigKey::Database),
            "import-file" | "import_file" => Ok(ConfigKey::ImportFile),
            other => Err(StudentError::Api(format!("Unknown config key: {}", other))),
        }
    }
}

impl StudentDbConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    pub fn get(&self, key: ConfigKey) -> &str {
        match key {
            ConfigKey::Database => &self.database,
            ConfigKey::ImportFile => &self.import_file,
        }
    }

    pub fn set(&mut self, key: ConfigKey, value: &str) -> Result<()> {
        let value = value.trim();
        if value.is_empty() {
            return Err(StudentError::Api(format!(
                "Config value for {} cannot be empty",
                key.name()
            )));
        }
        match key {
            ConfigKey::Database => self.database = value.to_string(),
            ConfigKey::ImportFile => self.import_file = value.to_string(),
        }
        Ok(())
    }

    pub fn database_path(&self, home: &Path) -> PathBuf {
        home.join(&self.database)
    }

    pub fn import_path(&self, home: &Path) -> PathBuf {
        home.join(&self.import_file)
    }
}
