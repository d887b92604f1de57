pub mod operation;
pub mod parameter;
pub mod ref_resolve;
pub mod schema;
pub mod spec;

use crate::error::{ConvertError, ParseError};
use ref_resolve::RefResolver;
use spec::SwaggerSpec;

/// Parse a Swagger spec from YAML.
pub fn from_yaml(input: &str) -> Result<SwaggerSpec, ParseError> {
    let spec: SwaggerSpec = serde_yaml_ng::from_str(input)?;
    validate_version(&spec)?;
    Ok(spec)
}

/// Parse a Swagger spec from JSON.
pub fn from_json(input: &str) -> Result<SwaggerSpec, ParseError> {
    let spec: SwaggerSpec = serde_json::from_str(input)?;
    validate_version(&spec)?;
    Ok(spec)
}

/// Parse a JSON spec and expand its references.
pub fn load_json(input: &str) -> Result<SwaggerSpec, ConvertError> {
    expand(&from_json(input)?)
}

/// Parse a YAML spec and expand its references.
pub fn load_yaml(input: &str) -> Result<SwaggerSpec, ConvertError> {
    expand(&from_yaml(input)?)
}

/// Expand every local reference reachable from the spec's paths.
pub fn expand(spec: &SwaggerSpec) -> Result<SwaggerSpec, ConvertError> {
    let mut resolver = RefResolver::new(spec);
    Ok(resolver.resolve_spec(spec)?)
}

fn validate_version(spec: &SwaggerSpec) -> Result<(), ParseError> {
    if !spec.swagger.trim().starts_with("2.") {
        return Err(ParseError::UnsupportedVersion(spec.swagger.clone()));
    }
    Ok(())
}
