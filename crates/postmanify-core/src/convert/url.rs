use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use super::synthesize::synthesize_simple;
use crate::config::EffectiveConfig;
use crate::parse::parameter::{Items, Parameter, ParameterLocation};
use crate::parse::schema::SchemaType;
use crate::postman::{QueryParam, Url};

/// Build the request URL of an operation.
///
/// The raw string is `scheme://prefix+hostname+suffix/basePath/path` with
/// whitespace removed from the path template, slash runs collapsed and
/// `{name}` placeholders rewritten to `{{name}}`. Every path segment that is
/// a single placeholder declares a URL variable; every query parameter adds
/// a query entry.
pub fn build_url(path_template: &str, parameters: &[Parameter], config: &EffectiveConfig) -> Url {
    let host = format!(
        "{}{}{}",
        config.hostname_prefix, config.hostname, config.hostname_suffix
    );
    let template: String = path_template.chars().filter(|c| !c.is_whitespace()).collect();

    let joined = [host.trim(), config.base_path.as_str(), template.as_str()].join("/");
    let joined = collapse_slashes(joined.trim());
    let raw = format!("{}://{}", config.scheme, joined.trim_start_matches('/'));
    let raw = rewrite_placeholders(&raw);

    let mut url = Url::parse(&raw);

    let names: Vec<String> = url
        .path
        .iter()
        .filter_map(|segment| path_variable_name(segment))
        .map(str::to_string)
        .collect();
    for name in names {
        let value = parameters
            .iter()
            .find(|p| p.location == ParameterLocation::Path && p.name == name)
            .and_then(|p| p.example.clone().or_else(|| p.default_value.clone()));
        url.add_variable(&name, value);
    }

    for param in build_query_params(parameters) {
        url.add_query_param(param);
    }

    url
}

/// Query entries for every `in: query` parameter, in declaration order.
pub fn build_query_params(parameters: &[Parameter]) -> Vec<QueryParam> {
    parameters
        .iter()
        .filter(|p| p.location == ParameterLocation::Query)
        .map(|p| QueryParam {
            key: p.name.clone(),
            value: Some(query_value(p)),
        })
        .collect()
}

/// example, then default, then first enum value, then the same three on the
/// item description of an array, then the type placeholder.
fn query_value(param: &Parameter) -> Value {
    if let Some(value) = declared_value(&param.example, &param.default_value, &param.enum_values) {
        return value;
    }

    if param.param_type == Some(SchemaType::Array) {
        let items = param.items.as_ref();
        return items
            .and_then(|i| declared_value(&i.example, &i.default_value, &i.enum_values))
            .unwrap_or_else(|| {
                synthesize_simple(
                    items.and_then(|i: &Items| i.item_type),
                    items.and_then(|i| i.format.as_deref()),
                )
            });
    }

    synthesize_simple(param.param_type, param.format.as_deref())
}

fn declared_value(
    example: &Option<Value>,
    default: &Option<Value>,
    enum_values: &[Value],
) -> Option<Value> {
    example
        .clone()
        .or_else(|| default.clone())
        .or_else(|| enum_values.first().cloned())
}

/// Runs of slashes.
static SLASH_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/+").expect("Invalid slash run regex"));

/// A single-brace `{name}` placeholder with the characters around it, so
/// doubled braces are left alone.
static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(^|[^{])\{([^/{}]+)\}([^}]|$)").expect("Invalid placeholder regex")
});

/// A path segment made of exactly one `{{name}}`.
static VARIABLE_SEGMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*\{\{([^{}]+)\}\}\s*$").expect("Invalid variable segment regex")
});

fn collapse_slashes(input: &str) -> Cow<'_, str> {
    SLASH_RUN_RE.replace_all(input, "/")
}

/// Rewrite single-brace `{name}` placeholders to `{{name}}`, leaving
/// already double-braced ones alone. Names cannot contain `/`, `{` or `}`.
///
/// A match consumes the character after the closing brace, so adjacent
/// placeholders take more than one pass.
fn rewrite_placeholders(raw: &str) -> String {
    let mut current = raw.to_string();
    loop {
        let next = match PLACEHOLDER_RE.replace_all(&current, "${1}{{${2}}}${3}") {
            Cow::Borrowed(_) => return current,
            Cow::Owned(next) => next,
        };
        current = next;
    }
}

/// The variable name of a segment made of exactly one `{{name}}`.
fn path_variable_name(segment: &str) -> Option<&str> {
    VARIABLE_SEGMENT_RE
        .captures(segment)
        .and_then(|caps| caps.get(1))
        .map(|name| name.as_str())
}
