use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use log::warn;

use super::operation::{Operation, PathItem};
use super::parameter::{Parameter, ParameterOrRef};
use super::schema::{Schema, SchemaOrRef};
use super::spec::SwaggerSpec;
use crate::error::ResolveError;

/// Expands local `$ref` pointers in a Swagger spec.
///
/// Schema references are followed into `definitions`, parameter references
/// into `parameters`. A schema reference met again while it is still being
/// expanded is left as a `Ref` node, which cuts the cycle.
///
/// Expansions that cut no cycle do not depend on the active path, so they
/// are cached per reference and shared definitions are expanded once.
pub struct RefResolver<'a> {
    definitions: &'a IndexMap<String, SchemaOrRef>,
    parameters: &'a IndexMap<String, ParameterOrRef>,
    visited: HashSet<String>,
    expanded: HashMap<String, SchemaOrRef>,
    cuts: usize,
}

impl<'a> RefResolver<'a> {
    pub fn new(spec: &'a SwaggerSpec) -> Self {
        Self {
            definitions: &spec.definitions,
            parameters: &spec.parameters,
            visited: HashSet::new(),
            expanded: HashMap::new(),
            cuts: 0,
        }
    }

    /// Resolve every path of the spec, returning a copy whose operations
    /// carry no reference other than cut cycles.
    pub fn resolve_spec(&mut self, spec: &SwaggerSpec) -> Result<SwaggerSpec, ResolveError> {
        let mut resolved = spec.clone();

        for (_path, item) in &mut resolved.paths {
            self.resolve_path_item(item)?;
        }

        Ok(resolved)
    }

    fn resolve_path_item(&mut self, item: &mut PathItem) -> Result<(), ResolveError> {
        item.parameters = self.resolve_parameters(&item.parameters)?;

        for op in [
            &mut item.get,
            &mut item.put,
            &mut item.post,
            &mut item.delete,
            &mut item.patch,
            &mut item.options,
            &mut item.head,
        ]
        .into_iter()
        .flatten()
        {
            self.resolve_operation(op)?;
        }
        Ok(())
    }

    fn resolve_operation(&mut self, op: &mut Operation) -> Result<(), ResolveError> {
        op.parameters = self.resolve_parameters(&op.parameters)?;
        Ok(())
    }

    fn resolve_parameters(
        &mut self,
        params: &[ParameterOrRef],
    ) -> Result<Vec<ParameterOrRef>, ResolveError> {
        params
            .iter()
            .map(|p| self.resolve_parameter_or_ref(p))
            .collect()
    }

    pub fn resolve_schema_or_ref(&mut self, schema_or_ref: &SchemaOrRef) -> SchemaOrRef {
        match schema_or_ref {
            SchemaOrRef::Ref { ref_path } => {
                if let Some(done) = self.expanded.get(ref_path) {
                    return done.clone();
                }
                if self.visited.contains(ref_path) {
                    self.cuts += 1;
                    return schema_or_ref.clone();
                }
                let target = match self.lookup_schema(ref_path) {
                    Ok(target) => target,
                    Err(e) => {
                        warn!("leaving schema reference unexpanded: {e}");
                        return schema_or_ref.clone();
                    }
                };
                let cuts_before = self.cuts;
                self.visited.insert(ref_path.clone());
                let result = self.resolve_schema_or_ref(&target);
                self.visited.remove(ref_path);
                if self.cuts == cuts_before {
                    self.expanded.insert(ref_path.clone(), result.clone());
                }
                result
            }
            SchemaOrRef::Schema(schema) => SchemaOrRef::Schema(Box::new(self.resolve_schema(schema))),
        }
    }

    fn resolve_schema(&mut self, schema: &Schema) -> Schema {
        let mut resolved = schema.clone();

        resolved.properties = schema
            .properties
            .iter()
            .map(|(name, prop)| (name.clone(), self.resolve_schema_or_ref(prop)))
            .collect();

        if let Some(ref items) = schema.items {
            resolved.items = Some(Box::new(self.resolve_schema_or_ref(items)));
        }

        resolved
    }

    fn resolve_parameter_or_ref(
        &mut self,
        param: &ParameterOrRef,
    ) -> Result<ParameterOrRef, ResolveError> {
        let param = match param {
            ParameterOrRef::Ref { ref_path } => self.lookup_parameter(ref_path)?,
            ParameterOrRef::Parameter(p) => p.clone(),
        };
        let mut resolved = param;
        if let Some(ref s) = resolved.schema {
            resolved.schema = Some(self.resolve_schema_or_ref(s));
        }
        Ok(ParameterOrRef::Parameter(resolved))
    }

    // Lookup helpers

    fn lookup_schema(&self, ref_path: &str) -> Result<SchemaOrRef, ResolveError> {
        let name = parse_ref_name(ref_path, "definitions")?;
        self.definitions
            .get(name)
            .cloned()
            .ok_or_else(|| ResolveError::RefTargetNotFound(ref_path.to_string()))
    }

    fn lookup_parameter(&self, ref_path: &str) -> Result<Parameter, ResolveError> {
        let name = parse_ref_name(ref_path, "parameters")?;
        self.parameters
            .get(name)
            .and_then(|p| p.as_parameter())
            .cloned()
            .ok_or_else(|| ResolveError::RefTargetNotFound(ref_path.to_string()))
    }
}

/// Parse a `$ref` path like `#/definitions/Pet` and extract the name.
fn parse_ref_name<'a>(ref_path: &'a str, expected_section: &str) -> Result<&'a str, ResolveError> {
    let stripped = ref_path
        .strip_prefix("#/")
        .ok_or_else(|| ResolveError::InvalidRefFormat(ref_path.to_string()))?;
    let (section, name) = stripped
        .split_once('/')
        .ok_or_else(|| ResolveError::InvalidRefFormat(ref_path.to_string()))?;
    if section != expected_section {
        return Err(ResolveError::InvalidRefFormat(format!(
            "expected section '{}', got '{}' in {}",
            expected_section, section, ref_path
        )));
    }
    Ok(name)
}
