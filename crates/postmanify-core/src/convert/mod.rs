pub mod example;
pub mod request;
pub mod script;
pub mod synthesize;
pub mod url;

use log::{debug, info};

use crate::config::ConvertConfig;
use crate::error::ConvertError;
use crate::parse::{self, spec::SwaggerSpec};
use crate::postman::{self, Collection};
use request::{Inherited, build_item};

/// Input document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Json,
    Yaml,
}

/// Build a collection from an expanded spec.
///
/// Paths are visited in lexicographic order and methods in the fixed
/// GET, PATCH, POST, PUT, DELETE order. Each operation lands in the folder
/// named by its first tag; operations without a tag are skipped.
pub fn assemble(spec: &SwaggerSpec, config: &ConvertConfig) -> Result<Collection, ConvertError> {
    let effective = config.resolve(spec);

    let mut collection = Collection::new(
        spec.info.title.trim(),
        spec.info.description.as_deref().unwrap_or_default().trim(),
    );

    let mut paths: Vec<&String> = spec.paths.keys().collect();
    paths.sort();

    for path in paths {
        let path_item = &spec.paths[path.as_str()];
        let inherited = Inherited {
            parameters: &path_item.parameters,
            consumes: &spec.consumes,
            produces: &spec.produces,
        };

        for (method, operation) in path_item.operations() {
            let Some(folder) = operation.folder_tag() else {
                debug!("skipping untagged operation {} {path}", method.as_str());
                continue;
            };
            let item = build_item(path, method, operation, inherited, &effective)
                .map_err(ConvertError::Serialize)?;
            collection.add_item(item, folder);
        }
    }

    for folder in &mut collection.item {
        folder.description = spec
            .tag(&folder.name)
            .and_then(|t| t.description.as_deref())
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string);
    }

    info!(
        "assembled {} requests in {} folders",
        collection.item.iter().map(|f| f.item.len()).sum::<usize>(),
        collection.item.len()
    );

    Ok(collection)
}

/// Load a spec from text, convert it and render the collection as JSON.
pub fn convert_str(
    input: &str,
    format: SourceFormat,
    config: &ConvertConfig,
) -> Result<String, ConvertError> {
    let spec = match format {
        SourceFormat::Json => parse::load_json(input)?,
        SourceFormat::Yaml => parse::load_yaml(input)?,
    };
    let collection = assemble(&spec, config)?;
    postman::to_json(&collection).map_err(ConvertError::Serialize)
}

pub fn convert_json(input: &str, config: &ConvertConfig) -> Result<String, ConvertError> {
    convert_str(input, SourceFormat::Json, config)
}

pub fn convert_yaml(input: &str, config: &ConvertConfig) -> Result<String, ConvertError> {
    convert_str(input, SourceFormat::Yaml, config)
}
