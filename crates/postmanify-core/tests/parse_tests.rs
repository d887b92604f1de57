use postmanify_core::parse;
use postmanify_core::parse::operation::HttpMethod;
use postmanify_core::parse::parameter::{ParameterLocation, ParameterOrRef};
use postmanify_core::parse::schema::{SchemaOrRef, SchemaType};

const PETSTORE: &str = include_str!("fixtures/petstore.json");
const MINIMAL: &str = include_str!("fixtures/minimal.yaml");

#[test]
fn parse_petstore_json() {
    let spec = parse::from_json(PETSTORE).expect("should parse petstore.json");
    assert_eq!(spec.swagger, "2.0");
    assert_eq!(spec.info.title, "Swagger Petstore");
    assert_eq!(spec.host.as_deref(), Some("petstore.swagger.io"));
    assert_eq!(spec.base_path.as_deref(), Some("/v2"));
    assert_eq!(spec.schemes, vec!["https", "http"]);
    assert_eq!(spec.paths.len(), 6);
    assert_eq!(spec.definitions.len(), 5);
    assert_eq!(spec.tags.len(), 2);

    let pet = spec.paths.get("/pet/{petId}").expect("should have /pet/{petId}");
    assert_eq!(pet.parameters.len(), 1);
    let methods: Vec<HttpMethod> = pet.operations().map(|(m, _)| m).collect();
    assert_eq!(
        methods,
        vec![HttpMethod::Get, HttpMethod::Post, HttpMethod::Delete]
    );
}

#[test]
fn parse_minimal_yaml() {
    let spec = parse::from_yaml(MINIMAL).expect("should parse minimal.yaml");
    assert_eq!(spec.info.title, "Test API");
    assert_eq!(spec.base_path.as_deref(), Some("/test/"));
    assert!(spec.schemes.is_empty());

    let get = spec.paths["/test/{test}"].get.as_ref().expect("should have GET");
    assert_eq!(get.parameters.len(), 4);
    let test2 = get.parameters[3].as_parameter().unwrap();
    assert_eq!(test2.param_type, Some(SchemaType::Array));
    assert_eq!(test2.items.as_ref().unwrap().enum_values.len(), 3);
}

#[test]
fn parse_rejects_other_versions() {
    let yaml = r#"
swagger: "3.0"
info:
  title: Test
  version: "1.0"
paths: {}
"#;
    assert!(parse::from_yaml(yaml).is_err());
    assert!(parse::from_json("{\"info\": {}}").is_err());
    assert!(parse::from_json("not json").is_err());
}

#[test]
fn load_expands_definitions() {
    let spec = parse::load_json(PETSTORE).expect("should load petstore.json");

    let post = spec.paths["/pet"].post.as_ref().unwrap();
    let body = post.parameters[0].as_parameter().unwrap();
    assert_eq!(body.location, ParameterLocation::Body);

    let schema = body.schema.as_ref().and_then(SchemaOrRef::as_schema).unwrap();
    assert!(schema.has_type(SchemaType::Object));
    assert_eq!(schema.properties.len(), 6);

    let category = schema.properties["category"].as_schema().unwrap();
    assert!(matches!(
        category.properties["parent"],
        SchemaOrRef::Ref { ref ref_path } if ref_path == "#/definitions/Category"
    ));
}

#[test]
fn load_expands_parameter_refs() {
    let spec = parse::load_json(PETSTORE).unwrap();
    let get = spec.paths["/pet/findByStatus"].get.as_ref().unwrap();
    match &get.parameters[1] {
        ParameterOrRef::Parameter(p) => {
            assert_eq!(p.name, "limit");
            assert_eq!(p.location, ParameterLocation::Query);
        }
        ParameterOrRef::Ref { .. } => panic!("expected an expanded parameter"),
    }
}

#[test]
fn load_fails_on_missing_parameter() {
    let json = r##"{
        "swagger": "2.0",
        "info": {"title": "t", "version": "1"},
        "paths": {
            "/a": {"get": {"tags": ["a"], "parameters": [{"$ref": "#/parameters/missing"}]}}
        }
    }"##;
    assert!(parse::load_json(json).is_err());
}

#[test]
fn load_keeps_missing_definition_as_ref() {
    let json = r##"{
        "swagger": "2.0",
        "info": {"title": "t", "version": "1"},
        "paths": {
            "/a": {"post": {"tags": ["a"], "parameters": [
                {"name": "body", "in": "body", "required": true, "schema": {"$ref": "#/definitions/Gone"}}
            ]}}
        }
    }"##;
    let spec = parse::load_json(json).expect("missing definitions are not fatal");
    let post = spec.paths["/a"].post.as_ref().unwrap();
    let body = post.parameters[0].as_parameter().unwrap();
    assert!(matches!(body.schema, Some(SchemaOrRef::Ref { .. })));
}
