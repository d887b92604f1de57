use serde::{Deserialize, Serialize};

/// A request URL, pre-split the way Postman stores it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Url {
    pub raw: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub protocol: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub host: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variable: Vec<UrlVariable>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub query: Vec<QueryParam>,
}

/// A path variable declared by a `{{name}}` path segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrlVariable {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
}

/// A query string entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryParam {
    pub key: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
}

impl Url {
    /// Split a raw `scheme://host/path` string into protocol, dot-separated
    /// host segments and non-empty path segments.
    ///
    /// A string without `://` keeps only its raw form.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        let mut url = Url {
            raw: raw.to_string(),
            ..Default::default()
        };

        let Some((protocol, rest)) = raw.split_once("://") else {
            return url;
        };
        if protocol.is_empty() || !protocol.chars().all(|c| c.is_ascii_lowercase()) {
            return url;
        }

        let (host, path) = rest.split_once('/').unwrap_or((rest, ""));
        url.protocol = protocol.to_string();
        url.host = host.split('.').map(str::to_string).collect();
        url.path = path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        url
    }

    /// Declare a path variable. Only the first declaration of an id is kept.
    pub fn add_variable(&mut self, id: &str, value: Option<serde_json::Value>) {
        if self.variable.iter().any(|v| v.id == id) {
            return;
        }
        self.variable.push(UrlVariable {
            id: id.to_string(),
            value,
        });
    }

    pub fn add_query_param(&mut self, param: QueryParam) {
        self.query.push(param);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_url() {
        let url = Url::parse("http://test.test.com/test/test");
        assert_eq!(url.raw, "http://test.test.com/test/test");
        assert_eq!(url.protocol, "http");
        assert_eq!(url.host, vec!["test", "test", "com"]);
        assert_eq!(url.path, vec!["test", "test"]);
    }

    #[test]
    fn test_parse_templated_host() {
        let url = Url::parse("https://{{test}}{{test}}{{test}}/test?test=true");
        assert_eq!(url.protocol, "https");
        assert_eq!(url.host, vec!["{{test}}{{test}}{{test}}"]);
        assert_eq!(url.path, vec!["test?test=true"]);
    }

    #[test]
    fn test_parse_drops_empty_segments() {
        let url = Url::parse("http://host/");
        assert_eq!(url.host, vec!["host"]);
        assert!(url.path.is_empty());
    }

    #[test]
    fn test_parse_without_scheme() {
        let url = Url::parse("host/path");
        assert_eq!(url.raw, "host/path");
        assert!(url.protocol.is_empty());
        assert!(url.host.is_empty());
        assert!(url.path.is_empty());
    }

    #[test]
    fn test_add_variable_keeps_first() {
        let mut url = Url::parse("http://test.com/{{a}}/{{b}}/{{a}}");
        url.add_variable("a", Some("value".into()));
        url.add_variable("b", None);
        url.add_variable("a", Some("other".into()));

        assert_eq!(url.variable.len(), 2);
        assert_eq!(url.variable[0].id, "a");
        assert_eq!(url.variable[0].value, Some("value".into()));
        assert_eq!(url.variable[1].id, "b");
    }
}
