use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::parse::spec::SwaggerSpec;
use crate::postman::Header;

/// Scheme used when neither the config nor the spec declares one.
pub const DEFAULT_SCHEME: &str = "http";

/// Conversion settings, loaded from `.postmanify.yaml` and/or CLI flags.
///
/// Unset (or blank) `hostname`, `base_path` and `scheme` fall back to the
/// values declared by the spec.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    pub hostname: Option<String>,
    pub hostname_prefix: Option<String>,
    pub hostname_suffix: Option<String>,
    pub base_path: Option<String>,
    pub scheme: Option<String>,
    /// Headers appended to every request, in order.
    pub headers: Vec<Header>,
}

/// The settings of one conversion run, with spec fallbacks applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveConfig {
    pub hostname: String,
    pub hostname_prefix: String,
    pub hostname_suffix: String,
    pub base_path: String,
    pub scheme: String,
    pub headers: Vec<Header>,
}

impl ConvertConfig {
    /// Fill unset fields from the spec's `host`, `basePath` and first
    /// declared scheme.
    pub fn resolve(&self, spec: &SwaggerSpec) -> EffectiveConfig {
        let hostname = non_blank(&self.hostname)
            .or_else(|| non_blank(&spec.host))
            .unwrap_or_default();
        let base_path = non_blank(&self.base_path)
            .or_else(|| non_blank(&spec.base_path))
            .unwrap_or_default();
        let scheme = non_blank(&self.scheme)
            .or_else(|| {
                spec.schemes
                    .first()
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
            })
            .unwrap_or_else(|| DEFAULT_SCHEME.to_string());

        EffectiveConfig {
            hostname,
            hostname_prefix: self.hostname_prefix.clone().unwrap_or_default(),
            hostname_suffix: self.hostname_suffix.clone().unwrap_or_default(),
            base_path,
            scheme,
            headers: self.headers.clone(),
        }
    }

    /// Layer `overrides` on top of `self`. Set fields of `overrides` win;
    /// its headers are appended after ours.
    pub fn merge(self, overrides: ConvertConfig) -> ConvertConfig {
        let mut headers = self.headers;
        headers.extend(overrides.headers);
        ConvertConfig {
            hostname: overrides.hostname.or(self.hostname),
            hostname_prefix: overrides.hostname_prefix.or(self.hostname_prefix),
            hostname_suffix: overrides.hostname_suffix.or(self.hostname_suffix),
            base_path: overrides.base_path.or(self.base_path),
            scheme: overrides.scheme.or(self.scheme),
            headers,
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Parse a `Key: Value` header argument.
pub fn parse_header(raw: &str) -> Result<Header, ConfigError> {
    let (key, value) = raw
        .split_once(':')
        .ok_or_else(|| ConfigError::InvalidHeader(raw.to_string()))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(ConfigError::InvalidHeader(raw.to_string()));
    }
    Ok(Header::new(key, value.trim()))
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".postmanify.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<ConvertConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config: ConvertConfig =
        serde_yaml_ng::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# postmanify configuration
# Every field is optional. hostname, base_path and scheme default to the
# spec's host, basePath and first scheme.

# hostname: api.example.com
hostname_prefix: ""
hostname_suffix: ""
# base_path: /v1
# scheme: https

headers: []
  # - key: Authorization
  #   value: "Bearer {{access_token}}"
"#
}
