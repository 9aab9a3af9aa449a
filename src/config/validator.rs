//! Configuration validation

use crate::config::Config;
use crate::error::{Result, SkyragError, ValidationError};

pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a configuration, collecting every failure
    pub fn validate(config: &Config) -> Result<()> {
        let mut errors = Vec::new();

        if config.graph.uri.is_empty() {
            errors.push(ValidationError::new("graph.uri", "must not be empty"));
        }

        if config.embedding.model.is_empty() {
            errors.push(ValidationError::new("embedding.model", "must not be empty"));
        }
        if config.embedding.dimension == 0 {
            errors.push(ValidationError::new("embedding.dimension", "must be positive"));
        }
        if config.embedding.batch_size == 0 {
            errors.push(ValidationError::new("embedding.batch_size", "must be positive"));
        }

        if config.index.vector_dim != config.embedding.dimension {
            errors.push(ValidationError::new(
                "index.vector_dim",
                format!(
                    "must match embedding.dimension ({} != {})",
                    config.index.vector_dim, config.embedding.dimension
                ),
            ));
        }
        if config.index.hnsw_ef_construction == 0 {
            errors.push(ValidationError::new(
                "index.hnsw_ef_construction",
                "must be positive",
            ));
        }
        if config.index.hnsw_m == 0 {
            errors.push(ValidationError::new("index.hnsw_m", "must be positive"));
        }

        if config.retrieval.default_limit == 0 {
            errors.push(ValidationError::new(
                "retrieval.default_limit",
                "must be positive",
            ));
        }
        if config.retrieval.max_limit < config.retrieval.default_limit {
            errors.push(ValidationError::new(
                "retrieval.max_limit",
                "must be at least retrieval.default_limit",
            ));
        }
        if config.retrieval.semantic_top_k == 0 {
            errors.push(ValidationError::new(
                "retrieval.semantic_top_k",
                "must be positive",
            ));
        }
        if config.retrieval.hnsw_ef_search == 0 {
            errors.push(ValidationError::new(
                "retrieval.hnsw_ef_search",
                "must be positive",
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SkyragError::ConfigValidation { errors })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_mismatch_rejected() {
        let mut config = Config::default();
        config.index.vector_dim = 768;

        let result = ConfigValidator::validate(&config);
        assert!(matches!(
            result,
            Err(SkyragError::ConfigValidation { .. })
        ));
    }

    #[test]
    fn test_zero_default_limit_rejected() {
        let mut config = Config::default();
        config.retrieval.default_limit = 0;
        assert!(ConfigValidator::validate(&config).is_err());
    }

    #[test]
    fn test_ceiling_below_default_rejected() {
        let mut config = Config::default();
        config.retrieval.max_limit = 5;
        assert!(ConfigValidator::validate(&config).is_err());
    }
}
