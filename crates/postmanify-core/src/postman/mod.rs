//! Postman collection (format v2.0) document model.

pub mod url;

use serde::{Deserialize, Serialize};

pub use url::{QueryParam, Url, UrlVariable};

/// Schema URL identifying the collection format version.
pub const SCHEMA: &str = "https://schema.getpostman.com/json/collection/v2.0.0/collection.json";

/// Script type of generated test scripts.
pub const SCRIPT_TYPE: &str = "text/javascript";

/// A Postman collection: requests grouped into one folder per tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub info: Info,
    pub item: Vec<Folder>,
}

/// Collection metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Info {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    pub schema: String,
}

/// A named group of requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Folder {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub item: Vec<Item>,
}

/// A single request entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub event: Vec<Event>,

    pub request: Request,
}

/// A script hooked to a request lifecycle event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub listen: String,
    pub script: Script,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    #[serde(rename = "type")]
    pub script_type: String,
    pub exec: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub url: Url,
    pub method: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub header: Vec<Header>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Body>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A request header. Also used for headers supplied through configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub key: String,
    pub value: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Header {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            description: None,
        }
    }
}

/// How a request body is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyMode {
    #[default]
    Raw,
    FormData,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Body {
    pub mode: BodyMode,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub raw: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub formdata: Vec<FormDataParam>,
}

/// A `multipart/form-data` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormDataParam {
    pub key: String,
    pub value: String,
    #[serde(rename = "type")]
    pub param_type: String,
    pub enabled: bool,
}

impl Collection {
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            info: Info {
                name: name.to_string(),
                description: description.to_string(),
                schema: SCHEMA.to_string(),
            },
            item: Vec::new(),
        }
    }

    /// Append `item` to the folder named `folder`, creating the folder at the
    /// end of the list on first use.
    pub fn add_item(&mut self, item: Item, folder: &str) {
        match self.item.iter_mut().find(|f| f.name == folder) {
            Some(existing) => existing.item.push(item),
            None => self.item.push(Folder {
                name: folder.to_string(),
                description: None,
                item: vec![item],
            }),
        }
    }
}

/// Render a collection as JSON with 2-space indentation.
pub fn to_json(collection: &Collection) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(collection)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str) -> Item {
        Item {
            name: name.to_string(),
            event: Vec::new(),
            request: Request {
                url: Url::parse("http://example.com/"),
                method: "GET".to_string(),
                header: Vec::new(),
                body: None,
                description: None,
            },
        }
    }

    #[test]
    fn test_new_collection() {
        let collection = Collection::new("title", "description");
        assert_eq!(collection.info.name, "title");
        assert_eq!(collection.info.description, "description");
        assert_eq!(collection.info.schema, SCHEMA);
        assert!(collection.item.is_empty());
    }

    #[test]
    fn test_add_item_reuses_folder() {
        let mut collection = Collection::new("title", "description");

        collection.add_item(item("item request"), "test");
        assert_eq!(collection.item[0].name, "test");
        assert_eq!(collection.item[0].item[0].name, "item request");

        collection.add_item(item("item request 2"), "test");
        assert_eq!(collection.item.len(), 1);
        assert_eq!(collection.item[0].item.len(), 2);
        assert_eq!(collection.item[0].item[1].name, "item request 2");

        collection.add_item(item("other"), "other");
        assert_eq!(collection.item.len(), 2);
        assert_eq!(collection.item[1].name, "other");
    }

    #[test]
    fn test_body_mode_serialization() {
        let body = Body {
            mode: BodyMode::FormData,
            raw: String::new(),
            formdata: vec![FormDataParam {
                key: "name".to_string(),
                value: "string".to_string(),
                param_type: "text".to_string(),
                enabled: true,
            }],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "mode": "formdata",
                "formdata": [{"key": "name", "value": "string", "type": "text", "enabled": true}]
            })
        );
    }
}
