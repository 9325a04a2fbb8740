use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use seatx_core::kmeans::{DEFAULT_MAX_ITERATIONS, DEFAULT_N_INIT, DEFAULT_SEED};
use seatx_core::{PartitionConfig, Vocabulary};
use seatx_storage::StorageConfig;
use serde::Deserialize;

pub const CONFIG_ENV: &str = "SEATX_CONFIG";
const DEFAULT_CONFIG_FILE: &str = "seatx.toml";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub partition: PartitionSettings,
    #[serde(default)]
    pub server: ServerConfig,
    /// Interest labels; the built-in list when absent
    #[serde(default)]
    pub vocabulary: Option<Vocabulary>,
}

impl AppConfig {
    /// Load from `path`, `$SEATX_CONFIG`, or `./seatx.toml`, in that order.
    /// Falls back to defaults when no file is found.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let explicit = path.map(Path::to_path_buf).or_else(|| env::var(CONFIG_ENV).ok().map(PathBuf::from));

        let config_path = match explicit {
            Some(p) => p,
            None => {
                let local = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !local.exists() {
                    return Ok(AppConfig::default());
                }
                local
            }
        };

        let raw = fs::read_to_string(&config_path)
            .with_context(|| format!("failed to read config file {}", config_path.display()))?;
        Self::parse(&raw).with_context(|| format!("failed to parse TOML from {}", config_path.display()))
    }

    pub fn parse(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    pub fn vocabulary(&self) -> Vocabulary {
        self.vocabulary.clone().unwrap_or_default()
    }

    /// Run parameters for `tables` and `capacity` with the configured seed and limits
    pub fn partition_config(&self, tables: usize, capacity: usize) -> PartitionConfig {
        PartitionConfig {
            tables,
            capacity,
            seed: self.partition.seed,
            max_iterations: self.partition.max_iterations,
            n_init: self.partition.n_init,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PartitionSettings {
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
    #[serde(default = "default_n_init")]
    pub n_init: usize,
}

impl Default for PartitionSettings {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            max_iterations: default_max_iterations(),
            n_init: default_n_init(),
        }
    }
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

fn default_max_iterations() -> usize {
    DEFAULT_MAX_ITERATIONS
}

fn default_n_init() -> usize {
    DEFAULT_N_INIT
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_http_port")]
    pub http_port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: default_http_port(),
        }
    }
}

fn default_http_port() -> u16 {
    8080
}
