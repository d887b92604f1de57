use indexmap::IndexMap;
use log::debug;
use serde::Serialize;
use serde_json::{Map, Value};

use super::synthesize::synthesize;
use crate::parse::schema::{Schema, SchemaOrRef, SchemaType};

/// Build an example value for a schema node.
///
/// First match wins: explicit `example`, first `enum` entry of a string,
/// recursed object, one-element array, then the type placeholder. A `$ref`
/// still present after loading marks a cut cycle (or a missing definition)
/// and renders as an empty object.
pub fn build_value(node: &SchemaOrRef) -> Value {
    match node {
        SchemaOrRef::Ref { ref_path } => {
            debug!("rendering unexpanded reference {ref_path} as an empty object");
            Value::Object(Map::new())
        }
        SchemaOrRef::Schema(schema) => build_schema_value(schema),
    }
}

fn build_schema_value(schema: &Schema) -> Value {
    if let Some(ref example) = schema.example {
        return example.clone();
    }

    if schema.has_type(SchemaType::String) {
        if let Some(first) = schema.enum_values.first() {
            return first.clone();
        }
    }

    if schema.has_type(SchemaType::Object) {
        return build_object_body(&schema.properties);
    }

    if schema.has_type(SchemaType::Array) {
        return Value::Array(vec![build_item_value(schema.items.as_deref())]);
    }

    synthesize(schema.schema_type.as_ref(), schema.format.as_deref())
}

/// Array elements: objects recurse, anything else gets the type placeholder.
fn build_item_value(items: Option<&SchemaOrRef>) -> Value {
    match items {
        Some(SchemaOrRef::Schema(item)) if item.has_type(SchemaType::Object) => {
            build_object_body(&item.properties)
        }
        Some(SchemaOrRef::Schema(item)) => {
            synthesize(item.schema_type.as_ref(), item.format.as_deref())
        }
        Some(node @ SchemaOrRef::Ref { .. }) => build_value(node),
        None => synthesize(None, None),
    }
}

/// Build an example object from a property map, keys sorted ascending.
pub fn build_object_body(properties: &IndexMap<String, SchemaOrRef>) -> Value {
    let mut keys: Vec<&String> = properties.keys().collect();
    keys.sort();

    let mut body = Map::new();
    for key in keys {
        body.insert(key.clone(), build_value(&properties[key.as_str()]));
    }
    Value::Object(body)
}

/// Render a JSON value with tab indentation, as used for raw request bodies.
pub fn to_pretty_json(value: &Value) -> Result<String, serde_json::Error> {
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    value.serialize(&mut serializer)?;
    String::from_utf8(out).map_err(<serde_json::Error as serde::ser::Error>::custom)
}
