use log::debug;
use serde_json::Value;

use super::example::{build_value, to_pretty_json};
use super::script::test_event;
use super::synthesize::STRING_PLACEHOLDER;
use super::url::build_url;
use crate::config::EffectiveConfig;
use crate::parse::operation::{HttpMethod, Operation};
use crate::parse::parameter::{Parameter, ParameterLocation, ParameterOrRef};
use crate::parse::schema::SchemaType;
use crate::postman::{Body, BodyMode, FormDataParam, Header, Item, Request};

/// Settings an operation inherits from its path item and from the document.
#[derive(Debug, Clone, Copy, Default)]
pub struct Inherited<'a> {
    /// Parameters declared on the path item.
    pub parameters: &'a [ParameterOrRef],
    /// Document-level `consumes`, used when the operation declares none.
    pub consumes: &'a [String],
    /// Document-level `produces`, used when the operation declares none.
    pub produces: &'a [String],
}

/// Build the collection entry for one operation.
pub fn build_item(
    path_template: &str,
    method: HttpMethod,
    operation: &Operation,
    inherited: Inherited<'_>,
    config: &EffectiveConfig,
) -> Result<Item, serde_json::Error> {
    debug!("building {} {path_template}", method.as_str());

    let parameters = merge_parameters(inherited.parameters, &operation.parameters);

    let consumes = if operation.consumes.is_empty() {
        inherited.consumes
    } else {
        &operation.consumes
    };
    let produces = if operation.produces.is_empty() {
        inherited.produces
    } else {
        &operation.produces
    };

    let body = if method.has_body() {
        Some(build_body(&parameters)?)
    } else {
        None
    };

    let request = Request {
        url: build_url(path_template, &parameters, config),
        method: method.as_str().to_string(),
        header: build_headers(consumes, produces, &config.headers),
        body,
        description: describe(operation),
    };

    Ok(Item {
        name: path_template.to_string(),
        event: test_event(operation).into_iter().collect(),
        request,
    })
}

/// Path-level parameters followed by the operation's own. An operation
/// parameter replaces a path-level one with the same name and location.
fn merge_parameters(path_level: &[ParameterOrRef], own: &[ParameterOrRef]) -> Vec<Parameter> {
    let mut merged: Vec<Parameter> = path_level
        .iter()
        .filter_map(ParameterOrRef::as_parameter)
        .cloned()
        .collect();

    for param in own.iter().filter_map(ParameterOrRef::as_parameter) {
        match merged
            .iter_mut()
            .find(|p| p.name == param.name && p.location == param.location)
        {
            Some(existing) => *existing = param.clone(),
            None => merged.push(param.clone()),
        }
    }

    merged
}

/// `Content-Type` and `Accept` from the first media types, then the
/// configured headers.
pub fn build_headers(consumes: &[String], produces: &[String], configured: &[Header]) -> Vec<Header> {
    let mut headers = Vec::with_capacity(configured.len() + 2);

    if let Some(content_type) = first_media_type(consumes) {
        headers.push(Header::new("Content-Type", content_type));
    }
    if let Some(accept) = first_media_type(produces) {
        headers.push(Header::new("Accept", accept));
    }
    headers.extend(configured.iter().cloned());

    headers
}

fn first_media_type(types: &[String]) -> Option<&str> {
    types.first().map(|t| t.trim()).filter(|t| !t.is_empty())
}

/// Form fields when any `formData` parameter exists, otherwise the raw JSON
/// example of the first required body parameter. An empty raw body when
/// neither applies.
pub fn build_body(parameters: &[Parameter]) -> Result<Body, serde_json::Error> {
    let formdata: Vec<FormDataParam> = parameters
        .iter()
        .filter(|p| p.location == ParameterLocation::FormData)
        .map(|p| FormDataParam {
            key: p.name.clone(),
            value: form_value(p),
            param_type: "text".to_string(),
            enabled: p.required,
        })
        .collect();

    if !formdata.is_empty() {
        return Ok(Body {
            mode: BodyMode::FormData,
            raw: String::new(),
            formdata,
        });
    }

    let raw = parameters
        .iter()
        .find(|p| p.location == ParameterLocation::Body && p.required)
        .and_then(|p| p.schema.as_ref())
        .filter(|schema| {
            schema.has_type(SchemaType::Object) || schema.has_type(SchemaType::Array)
        })
        .map(|schema| to_pretty_json(&build_value(schema)))
        .transpose()?
        .unwrap_or_default();

    Ok(Body {
        mode: BodyMode::Raw,
        raw,
        formdata: Vec::new(),
    })
}

fn form_value(param: &Parameter) -> String {
    match param.default_value.as_ref().or(param.example.as_ref()) {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => STRING_PLACEHOLDER.to_string(),
    }
}

fn describe(operation: &Operation) -> Option<String> {
    [&operation.description, &operation.summary]
        .into_iter()
        .flatten()
        .map(|s| s.trim())
        .find(|s| !s.is_empty())
        .map(str::to_string)
}
