//! Configuration management for skyrag
//!
//! Holds the externally-supplied inputs: graph store coordinates, the
//! embedding model selector, index parameters, and the retrieval caps.
//! Loaded once at startup, validated, then passed by reference; nothing
//! here mutates after initialization.

use crate::error::{Result, SkyragError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod validator;

pub use validator::ConfigValidator;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub graph: GraphConfig,
    pub embedding: EmbeddingConfig,
    pub index: IndexConfig,
    pub retrieval: RetrievalConfig,
}

/// Graph store connection coordinates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphConfig {
    pub uri: String,
    pub username: String,
    pub password: String,
    pub database: String,
}

/// Embedding model selection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Model name (e.g. "all-MiniLM-L6-v2")
    pub model: String,
    /// Embedding dimension; must match the index vector dimension
    pub dimension: usize,
    /// Batch size for index builds
    pub batch_size: usize,
}

/// HNSW vector index parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    pub vector_dim: usize,
    pub hnsw_ef_construction: usize,
    pub hnsw_m: usize,
}

/// Retrieval caps and recall width
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Symbolic result cap when the question names no limit
    pub default_limit: usize,
    /// Ceiling an extracted limit is clamped to
    pub max_limit: usize,
    /// Semantic recall width; fixed per process, never per question
    pub semantic_top_k: usize,
    /// HNSW search parameter (higher = better recall, slower search)
    pub hnsw_ef_search: usize,
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(SkyragError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| SkyragError::Io {
            source: e,
            context: format!("Failed to read config file: {:?}", path),
        })?;
        let mut config: Config = toml::from_str(&content)?;

        config.apply_env_overrides()?;
        ConfigValidator::validate(&config)?;

        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| SkyragError::Io {
            source: e,
            context: format!("Failed to write config file: {:?}", path),
        })?;
        Ok(())
    }

    /// Apply environment variable overrides.
    /// Variables use the format SKYRAG_SECTION__KEY=value.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        for (key, value) in std::env::vars() {
            if let Some(config_key) = key.strip_prefix("SKYRAG_") {
                self.set_value_from_env(config_key, &value)?;
            }
        }
        Ok(())
    }

    fn set_value_from_env(&mut self, path: &str, value: &str) -> Result<()> {
        match path {
            "GRAPH__URI" => self.graph.uri = value.to_string(),
            "GRAPH__USERNAME" => self.graph.username = value.to_string(),
            "GRAPH__PASSWORD" => self.graph.password = value.to_string(),
            "GRAPH__DATABASE" => self.graph.database = value.to_string(),
            "EMBEDDING__MODEL" => self.embedding.model = value.to_string(),
            "RETRIEVAL__DEFAULT_LIMIT" => {
                self.retrieval.default_limit = parse_usize(path, value)?;
            }
            "RETRIEVAL__MAX_LIMIT" => {
                self.retrieval.max_limit = parse_usize(path, value)?;
            }
            "RETRIEVAL__SEMANTIC_TOP_K" => {
                self.retrieval.semantic_top_k = parse_usize(path, value)?;
            }
            _ => {
                tracing::debug!("Unknown env config key: {}", path);
            }
        }
        Ok(())
    }

    /// Get the default configuration file path
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| SkyragError::Config("Cannot determine config directory".to_string()))?;

        Ok(config_dir.join("skyrag").join("config.toml"))
    }
}

fn parse_usize(path: &str, value: &str) -> Result<usize> {
    value.parse().map_err(|_| SkyragError::InvalidConfigValue {
        path: path.to_string(),
        message: format!("Cannot parse '{}' as an integer", value),
    })
}

impl Default for Config {
    fn default() -> Self {
        Self {
            graph: GraphConfig {
                uri: "bolt://localhost:7687".to_string(),
                username: "neo4j".to_string(),
                password: String::new(),
                database: "neo4j".to_string(),
            },
            embedding: EmbeddingConfig {
                model: "all-MiniLM-L6-v2".to_string(),
                dimension: 384,
                batch_size: 32,
            },
            index: IndexConfig {
                vector_dim: 384,
                hnsw_ef_construction: 200,
                hnsw_m: 16,
            },
            retrieval: RetrievalConfig {
                default_limit: 10,
                max_limit: 100,
                semantic_top_k: 5,
                hnsw_ef_search: 50,
            },
        }
    }
}
