use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::ConfigError;

/// Retrieval pipeline configuration.
///
/// Every field is optional in serialized form and falls back to its
/// default when absent. Validation is explicit and happens at
/// construction time: invalid values are rejected, never clamped.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrieverConfig {
    /// Whether multiple signal rankings are fused with Reciprocal Rank
    /// Fusion. When disabled, only the primary (lexical) signal runs.
    pub use_rrf: bool,
    /// RRF smoothing constant. Higher values flatten the influence of
    /// top ranks from any single signal. Must be positive.
    pub rrf_k: u32,
    /// Whether fused candidates are re-ranked with Maximal Marginal
    /// Relevance before truncation.
    pub use_mmr: bool,
    /// MMR trade-off: 1.0 is pure relevance, 0.0 is pure diversity.
    /// Must lie within [0.0, 1.0].
    pub mmr_lambda: f64,
}

impl Default for RetrieverConfig {
    fn default() -> Self {
        Self {
            use_rrf: defaults::DEFAULT_USE_RRF,
            rrf_k: defaults::DEFAULT_RRF_K,
            use_mmr: defaults::DEFAULT_USE_MMR,
            mmr_lambda: defaults::DEFAULT_MMR_LAMBDA,
        }
    }
}

impl RetrieverConfig {
    /// Check every field against its documented range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rrf_k == 0 {
            return Err(ConfigError::RrfKNotPositive { value: self.rrf_k });
        }
        // RangeInclusive::contains is false for NaN, so NaN is rejected here too.
        if !(0.0..=1.0).contains(&self.mmr_lambda) {
            return Err(ConfigError::MmrLambdaOutOfRange {
                value: self.mmr_lambda,
            });
        }
        Ok(())
    }

    /// Parse from a TOML string and validate.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(RetrieverConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_zero_rrf_k() {
        let config = RetrieverConfig {
            rrf_k: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::RrfKNotPositive { value: 0 })
        ));
    }

    #[test]
    fn rejects_lambda_above_one() {
        let config = RetrieverConfig {
            mmr_lambda: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MmrLambdaOutOfRange { .. })
        ));
    }

    #[test]
    fn rejects_lambda_nan() {
        let config = RetrieverConfig {
            mmr_lambda: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let config = RetrieverConfig::from_toml_str("mmr_lambda = 0.5").unwrap();
        assert_eq!(config.mmr_lambda, 0.5);
        assert_eq!(config.rrf_k, defaults::DEFAULT_RRF_K);
        assert!(config.use_rrf);
        assert!(config.use_mmr);
    }

    #[test]
    fn empty_toml_is_the_default_config() {
        let config = RetrieverConfig::from_toml_str("").unwrap();
        assert_eq!(config.rrf_k, defaults::DEFAULT_RRF_K);
        assert_eq!(config.mmr_lambda, defaults::DEFAULT_MMR_LAMBDA);
    }

    #[test]
    fn toml_with_out_of_range_lambda_is_rejected() {
        let err = RetrieverConfig::from_toml_str("mmr_lambda = 1.5").unwrap_err();
        assert!(matches!(err, ConfigError::MmrLambdaOutOfRange { .. }));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = RetrieverConfig::from_toml_str("mmr_lambda = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    proptest! {
        #[test]
        fn any_lambda_in_unit_interval_validates(lambda in 0.0f64..=1.0) {
            let config = RetrieverConfig {
                mmr_lambda: lambda,
                ..Default::default()
            };
            prop_assert!(config.validate().is_ok());
        }

        #[test]
        fn any_lambda_above_one_is_rejected(lambda in 1.0000001f64..100.0) {
            let config = RetrieverConfig {
                mmr_lambda: lambda,
                ..Default::default()
            };
            prop_assert!(config.validate().is_err());
        }
    }
}
