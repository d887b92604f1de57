use serde_json::Value;

use crate::parse::schema::{SchemaType, TypeSet};

/// Fixed RFC 3339 timestamp used for `date-time` strings, so output never
/// depends on the clock.
pub const DATE_TIME_PLACEHOLDER: &str = "2009-11-17T20:34:58Z";

/// Placeholder for string values.
pub const STRING_PLACEHOLDER: &str = "string";

/// Placeholder value for a primitive type and format.
///
/// `integer` wins over `string` when a type set holds both. Any type other
/// than those two yields an empty string.
pub fn synthesize(types: Option<&TypeSet>, format: Option<&str>) -> Value {
    let Some(types) = types else {
        return Value::from("");
    };

    if types.contains(SchemaType::Integer) {
        return Value::from(0);
    }

    if types.contains(SchemaType::String) {
        return match format {
            Some("date-time") => Value::from(DATE_TIME_PLACEHOLDER),
            _ => Value::from(STRING_PLACEHOLDER),
        };
    }

    Value::from("")
}

/// `synthesize` for the single-typed fields of non-body parameters.
pub fn synthesize_simple(ty: Option<SchemaType>, format: Option<&str>) -> Value {
    synthesize(ty.map(TypeSet::from).as_ref(), format)
}
