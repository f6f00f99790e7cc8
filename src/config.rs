//! Process-wide analysis settings.
//!
//! A [`Config`] is built once at startup, either through its builder or from the
//! environment, and then passed by reference into every analysis.

use bon::Builder;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Longest edge, in pixels, an image is scaled down to before color analysis.
pub const DEFAULT_MAX_DIMENSION: u32 = 512;

pub const ENV_AVERAGING_METHOD: &str = "AVERAGING_METHOD";
pub const ENV_MAX_DIMENSION: &str = "MAX_DIMENSION";
pub const ENV_ALPHA_THRESHOLD: &str = "ALPHA_THRESHOLD";
pub const ENV_HOST_REWRITE: &str = "IMAGE_HOST_REWRITE";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown averaging method '{0}', expected arithmetic, harmonic or geometric")]
    InvalidAveragingMethod(String),

    #[error("Invalid host rewrite '{0}', expected 'from_host:port=to_host:port'")]
    InvalidHostRewrite(String),

    #[error("Invalid value '{value}' for {key}")]
    InvalidNumber { key: &'static str, value: String },
}

/// Per-channel aggregation used for the average color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AveragingMethod {
    #[default]
    Arithmetic,
    Harmonic,
    Geometric,
}

impl AveragingMethod {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Arithmetic => "arithmetic",
            Self::Harmonic => "harmonic",
            Self::Geometric => "geometric",
        }
    }
}

impl fmt::Display for AveragingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for AveragingMethod {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "arithmetic" => Ok(Self::Arithmetic),
            "harmonic" => Ok(Self::Harmonic),
            "geometric" => Ok(Self::Geometric),
            _ => Err(ConfigError::InvalidAveragingMethod(s.to_string())),
        }
    }
}

/// Replaces one `host:port` authority with another when normalizing image URLs.
///
/// Used when images are referenced by a public address that is reachable under a
/// different name from where the analyzer runs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct HostRewrite {
    pub from: String,
    pub to: String,
}

impl FromStr for HostRewrite {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidHostRewrite(s.to_string());
        let (from, to) = s.split_once('=').ok_or_else(invalid)?;
        let (from, to) = (from.trim(), to.trim());
        if from.is_empty() || to.is_empty() || from.contains('/') || to.contains('/') {
            return Err(invalid());
        }
        Ok(Self {
            from: from.to_ascii_lowercase(),
            to: to.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Builder, Deserialize, Serialize)]
pub struct Config {
    #[builder(default)]
    pub averaging_method: AveragingMethod,
    #[builder(default = DEFAULT_MAX_DIMENSION)]
    pub max_dimension: u32,
    /// Pixels with an alpha strictly above this value count as opaque.
    #[builder(default)]
    pub alpha_threshold: u8,
    pub host_rewrite: Option<HostRewrite>,
}

impl Default for Config {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Config {
    /// Reads the configuration from the process environment.
    ///
    /// Unset variables fall back to their defaults. Any malformed value is an error, so
    /// a misconfigured process refuses to start instead of failing on every request.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let averaging_method = lookup(ENV_AVERAGING_METHOD)
            .map(|v| v.parse::<AveragingMethod>())
            .transpose()?
            .unwrap_or_default();
        let max_dimension = match lookup(ENV_MAX_DIMENSION) {
            Some(v) => parse_number(ENV_MAX_DIMENSION, &v).and_then(|n: u32| {
                if n == 0 {
                    Err(ConfigError::InvalidNumber {
                        key: ENV_MAX_DIMENSION,
                        value: v.clone(),
                    })
                } else {
                    Ok(n)
                }
            })?,
            None => DEFAULT_MAX_DIMENSION,
        };
        let alpha_threshold = lookup(ENV_ALPHA_THRESHOLD)
            .map(|v| parse_number::<u8>(ENV_ALPHA_THRESHOLD, &v))
            .transpose()?
            .unwrap_or(0);
        let host_rewrite = lookup(ENV_HOST_REWRITE)
            .filter(|v| !v.trim().is_empty())
            .map(|v| v.parse::<HostRewrite>())
            .transpose()?;

        Ok(Self {
            averaging_method,
            max_dimension,
            alpha_threshold,
            host_rewrite,
        })
    }
}

fn parse_number<T: FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidNumber {
            key,
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_environment_is_empty() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.averaging_method, AveragingMethod::Arithmetic);
        assert_eq!(config.max_dimension, 512);
        assert_eq!(config.alpha_threshold, 0);
        assert!(config.host_rewrite.is_none());
    }

    #[test]
    fn test_parses_averaging_method_case_insensitively() {
        let config = Config::from_lookup(lookup_from(&[("AVERAGING_METHOD", " Geometric ")]))
            .unwrap();
        assert_eq!(config.averaging_method, AveragingMethod::Geometric);

        assert_eq!(
            "HARMONIC".parse::<AveragingMethod>(),
            Ok(AveragingMethod::Harmonic)
        );
    }

    #[test]
    fn test_rejects_unknown_averaging_method() {
        let result = Config::from_lookup(lookup_from(&[("AVERAGING_METHOD", "median")]));
        assert_eq!(
            result,
            Err(ConfigError::InvalidAveragingMethod("median".to_string())),
            "An unknown method must fail at configuration time"
        );
    }

    #[test]
    fn test_rejects_zero_or_garbage_dimensions() {
        assert!(matches!(
            Config::from_lookup(lookup_from(&[("MAX_DIMENSION", "0")])),
            Err(ConfigError::InvalidNumber { key: "MAX_DIMENSION", .. })
        ));
        assert!(matches!(
            Config::from_lookup(lookup_from(&[("ALPHA_THRESHOLD", "300")])),
            Err(ConfigError::InvalidNumber { key: "ALPHA_THRESHOLD", .. })
        ));
    }

    #[test]
    fn test_parses_host_rewrite() {
        let config = Config::from_lookup(lookup_from(&[(
            "IMAGE_HOST_REWRITE",
            "localhost:3210=backend:3210",
        )]))
        .unwrap();
        assert_eq!(
            config.host_rewrite,
            Some(HostRewrite {
                from: "localhost:3210".to_string(),
                to: "backend:3210".to_string(),
            })
        );

        assert!("localhost:3210".parse::<HostRewrite>().is_err());
        assert!("=backend".parse::<HostRewrite>().is_err());
        assert!("http://a=b".parse::<HostRewrite>().is_err());
    }

    #[test]
    fn test_builder_overrides() {
        let config = Config::builder()
            .averaging_method(AveragingMethod::Harmonic)
            .max_dimension(64)
            .alpha_threshold(127)
            .build();
        assert_eq!(config.averaging_method, AveragingMethod::Harmonic);
        assert_eq!(config.max_dimension, 64);
        assert_eq!(config.alpha_threshold, 127);
    }

    #[test]
    fn test_method_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&AveragingMethod::Geometric).unwrap(),
            "\"geometric\""
        );
        assert_eq!(AveragingMethod::Harmonic.to_string(), "harmonic");
    }
}
