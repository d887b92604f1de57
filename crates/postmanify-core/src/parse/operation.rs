use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

use super::parameter::ParameterOrRef;

/// HTTP methods the converter emits requests for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Patch,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    /// Processing order of methods within one path.
    pub const ORDERED: [HttpMethod; 5] = [
        HttpMethod::Get,
        HttpMethod::Patch,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Whether requests with this method carry a body.
    pub fn has_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch)
    }
}

/// An API operation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Operation {
    #[serde(rename = "operationId", skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub consumes: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub produces: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ParameterOrRef>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub responses: IndexMap<StatusCode, serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,

    /// Vendor extensions (`x-*`) and any other keys not modeled above.
    #[serde(flatten)]
    pub extensions: IndexMap<String, serde_json::Value>,
}

impl Operation {
    /// The trimmed first tag, if it is non-empty. Decides folder placement.
    pub fn folder_tag(&self) -> Option<&str> {
        self.tags
            .first()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
    }

    /// Look up a vendor extension by its full `x-` key.
    pub fn extension(&self, key: &str) -> Option<&serde_json::Value> {
        if !key.starts_with("x-") {
            return None;
        }
        self.extensions.get(key)
    }
}

/// Key of the `responses` map. YAML documents usually leave codes unquoted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct StatusCode(pub String);

impl<'de> Deserialize<'de> for StatusCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Code(u64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(text) => StatusCode(text),
            Raw::Code(code) => StatusCode(code.to_string()),
        })
    }
}

/// A path item, containing operations keyed by HTTP method.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PathItem {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ParameterOrRef>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub get: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub put: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patch: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head: Option<Operation>,
}

impl PathItem {
    pub fn operation(&self, method: HttpMethod) -> Option<&Operation> {
        match method {
            HttpMethod::Get => self.get.as_ref(),
            HttpMethod::Patch => self.patch.as_ref(),
            HttpMethod::Post => self.post.as_ref(),
            HttpMethod::Put => self.put.as_ref(),
            HttpMethod::Delete => self.delete.as_ref(),
        }
    }

    /// Declared operations in `HttpMethod::ORDERED` order.
    pub fn operations(&self) -> impl Iterator<Item = (HttpMethod, &Operation)> {
        HttpMethod::ORDERED
            .into_iter()
            .filter_map(|method| self.operation(method).map(|op| (method, op)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operations_follow_fixed_order() {
        let item = PathItem {
            delete: Some(Operation::default()),
            get: Some(Operation::default()),
            post: Some(Operation::default()),
            ..Default::default()
        };
        let methods: Vec<HttpMethod> = item.operations().map(|(m, _)| m).collect();
        assert_eq!(
            methods,
            vec![HttpMethod::Get, HttpMethod::Post, HttpMethod::Delete]
        );
    }

    #[test]
    fn test_folder_tag() {
        let mut op = Operation {
            tags: vec!["  pet ".to_string(), "store".to_string()],
            ..Default::default()
        };
        assert_eq!(op.folder_tag(), Some("pet"));

        op.tags = vec!["   ".to_string()];
        assert_eq!(op.folder_tag(), None);

        op.tags.clear();
        assert_eq!(op.folder_tag(), None);
    }

    #[test]
    fn test_extensions_are_captured() {
        let json = r#"{
            "tags": ["pet"],
            "x-postman-script": "pm.test('ok');",
            "security": [{"api_key": []}]
        }"#;
        let op: Operation = serde_json::from_str(json).unwrap();
        assert!(op.extension("x-postman-script").is_some());
        assert!(op.extension("security").is_none());
    }

    #[test]
    fn test_unquoted_status_codes() {
        let yaml = r#"
tags: [pet]
responses:
  200:
    description: ok
  default:
    description: error
"#;
        let op: Operation = serde_yaml_ng::from_str(yaml).unwrap();
        let codes: Vec<&str> = op.responses.keys().map(|c| c.0.as_str()).collect();
        assert_eq!(codes, vec!["200", "default"]);
    }
}
