use indexmap::IndexMap;

use super::components::Components;
use super::media_type::MediaType;
use super::operation::{Operation, PathItem};
use super::parameter::ParameterOrRef;
use super::request_body::RequestBodyOrRef;
use super::response::ResponseOrRef;
use super::schema::{AdditionalProperties, Schema, SchemaOrRef};
use super::spec::OpenApiSpec;
use crate::error::ResolveError;

/// Inlines `$ref` pointers to component parameters, request bodies and responses.
///
/// Schema refs are kept as named references so generated types can point at the
/// component declaration, but each one is checked to have a target.
pub struct RefResolver<'a> {
    components: Option<&'a Components>,
}

impl<'a> RefResolver<'a> {
    pub fn new(spec: &'a OpenApiSpec) -> Self {
        Self {
            components: spec.components.as_ref(),
        }
    }

    /// Return a copy of the spec with every non-schema `$ref` replaced by its target.
    pub fn resolve_spec(&self, spec: &OpenApiSpec) -> Result<OpenApiSpec, ResolveError> {
        let mut resolved = spec.clone();

        for item in resolved.paths.values_mut() {
            self.resolve_path_item(item)?;
        }

        if let Some(ref components) = resolved.components {
            for schema in components.schemas.values() {
                self.check_schema_refs(schema)?;
            }
        }

        Ok(resolved)
    }

    fn resolve_path_item(&self, item: &mut PathItem) -> Result<(), ResolveError> {
        item.parameters = self.resolve_parameters(&item.parameters)?;
        for op in item.operations_mut() {
            self.resolve_operation(op)?;
        }
        Ok(())
    }

    fn resolve_operation(&self, op: &mut Operation) -> Result<(), ResolveError> {
        op.parameters = self.resolve_parameters(&op.parameters)?;

        if let Some(ref body) = op.request_body {
            let rb = match body {
                RequestBodyOrRef::Ref { ref_path } => self.lookup_request_body(ref_path)?,
                RequestBodyOrRef::RequestBody(rb) => rb.clone(),
            };
            self.check_content_refs(&rb.content)?;
            op.request_body = Some(RequestBodyOrRef::RequestBody(rb));
        }

        let mut responses = IndexMap::new();
        for (status, resp) in &op.responses {
            let r = match resp {
                ResponseOrRef::Ref { ref_path } => self.lookup_response(ref_path)?,
                ResponseOrRef::Response(r) => r.clone(),
            };
            self.check_content_refs(&r.content)?;
            responses.insert(status.clone(), ResponseOrRef::Response(r));
        }
        op.responses = responses;

        Ok(())
    }

    fn resolve_parameters(
        &self,
        params: &[ParameterOrRef],
    ) -> Result<Vec<ParameterOrRef>, ResolveError> {
        params
            .iter()
            .map(|p| {
                let param = match p {
                    ParameterOrRef::Ref { ref_path } => self.lookup_parameter(ref_path)?,
                    ParameterOrRef::Parameter(param) => param.clone(),
                };
                if let Some(ref schema) = param.schema {
                    self.check_schema_refs(schema)?;
                }
                Ok(ParameterOrRef::Parameter(param))
            })
            .collect()
    }

    fn check_content_refs(&self, content: &IndexMap<String, MediaType>) -> Result<(), ResolveError> {
        for mt in content.values() {
            if let Some(ref schema) = mt.schema {
                self.check_schema_refs(schema)?;
            }
        }
        Ok(())
    }

    /// Walk a schema tree and fail on any `$ref` without a component target.
    fn check_schema_refs(&self, schema_or_ref: &SchemaOrRef) -> Result<(), ResolveError> {
        match schema_or_ref {
            SchemaOrRef::Ref { ref_path } => {
                let name = parse_ref_name(ref_path, "schemas")?;
                let exists = self
                    .components
                    .is_some_and(|c| c.schemas.contains_key(name));
                if exists {
                    Ok(())
                } else {
                    Err(ResolveError::RefTargetNotFound(ref_path.clone()))
                }
            }
            SchemaOrRef::Schema(schema) => self.check_nested_refs(schema),
        }
    }

    fn check_nested_refs(&self, schema: &Schema) -> Result<(), ResolveError> {
        for prop in schema.properties.values() {
            self.check_schema_refs(prop)?;
        }
        if let Some(ref items) = schema.items {
            self.check_schema_refs(items)?;
        }
        for sub in schema
            .all_of
            .iter()
            .chain(&schema.one_of)
            .chain(&schema.any_of)
        {
            self.check_schema_refs(sub)?;
        }
        if let Some(AdditionalProperties::Schema(ref s)) = schema.additional_properties {
            self.check_schema_refs(s)?;
        }
        Ok(())
    }

    fn lookup_parameter(&self, ref_path: &str) -> Result<super::parameter::Parameter, ResolveError> {
        let name = parse_ref_name(ref_path, "parameters")?;
        self.components
            .and_then(|c| c.parameters.get(name))
            .and_then(|p| match p {
                ParameterOrRef::Parameter(param) => Some(param.clone()),
                ParameterOrRef::Ref { .. } => None,
            })
            .ok_or_else(|| ResolveError::RefTargetNotFound(ref_path.to_string()))
    }

    fn lookup_request_body(
        &self,
        ref_path: &str,
    ) -> Result<super::request_body::RequestBody, ResolveError> {
        let name = parse_ref_name(ref_path, "requestBodies")?;
        self.components
            .and_then(|c| c.request_bodies.get(name))
            .and_then(|rb| match rb {
                RequestBodyOrRef::RequestBody(body) => Some(body.clone()),
                RequestBodyOrRef::Ref { .. } => None,
            })
            .ok_or_else(|| ResolveError::RefTargetNotFound(ref_path.to_string()))
    }

    fn lookup_response(&self, ref_path: &str) -> Result<super::response::Response, ResolveError> {
        let name = parse_ref_name(ref_path, "responses")?;
        self.components
            .and_then(|c| c.responses.get(name))
            .and_then(|r| match r {
                ResponseOrRef::Response(resp) => Some(resp.clone()),
                ResponseOrRef::Ref { .. } => None,
            })
            .ok_or_else(|| ResolveError::RefTargetNotFound(ref_path.to_string()))
    }
}

/// Parse a `$ref` path like `#/components/schemas/Foo` and extract the name.
pub fn parse_ref_name<'a>(
    ref_path: &'a str,
    expected_section: &str,
) -> Result<&'a str, ResolveError> {
    let stripped = ref_path
        .strip_prefix("#/components/")
        .ok_or_else(|| ResolveError::InvalidRefFormat(ref_path.to_string()))?;
    let (section, name) = stripped
        .split_once('/')
        .ok_or_else(|| ResolveError::InvalidRefFormat(ref_path.to_string()))?;
    if section != expected_section {
        return Err(ResolveError::InvalidRefFormat(format!(
            "expected section '{expected_section}', got '{section}' in {ref_path}"
        )));
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    const SPEC: &str = r##"
openapi: 3.0.1
info: {title: Refs, version: "1"}
paths:
  /things/{id}:
    parameters:
      - $ref: "#/components/parameters/ThingId"
    get:
      responses:
        "200":
          $ref: "#/components/responses/ThingResponse"
components:
  parameters:
    ThingId:
      name: id
      in: path
      required: true
      schema: {type: string}
  responses:
    ThingResponse:
      description: a thing
      content:
        application/json:
          schema:
            $ref: "#/components/schemas/Thing"
  schemas:
    Thing:
      type: object
      properties:
        id: {type: string}
"##;

    #[test]
    fn test_inlines_parameter_and_response_refs() {
        let spec = parse::from_yaml(SPEC).unwrap();
        let resolved = RefResolver::new(&spec).resolve_spec(&spec).unwrap();
        let item = &resolved.paths["/things/{id}"];
        assert!(matches!(
            &item.parameters[0],
            ParameterOrRef::Parameter(p) if p.name == "id"
        ));
        let get = item.get.as_ref().unwrap();
        match &get.responses["200"] {
            ResponseOrRef::Response(r) => {
                let schema = r.content["application/json"].schema.as_ref().unwrap();
                // Schema refs stay named.
                assert!(matches!(schema, SchemaOrRef::Ref { ref_path } if ref_path.ends_with("/Thing")));
            }
            ResponseOrRef::Ref { .. } => panic!("response ref should be inlined"),
        }
    }

    #[test]
    fn test_missing_schema_target() {
        let broken = SPEC.replace("schemas/Thing\"", "schemas/Missing\"");
        let spec = parse::from_yaml(&broken).unwrap();
        let err = RefResolver::new(&spec).resolve_spec(&spec).unwrap_err();
        assert!(matches!(err, ResolveError::RefTargetNotFound(r) if r.ends_with("Missing")));
    }

    #[test]
    fn test_parse_ref_name() {
        assert_eq!(
            parse_ref_name("#/components/schemas/Account", "schemas").unwrap(),
            "Account"
        );
        assert!(parse_ref_name("#/definitions/Account", "schemas").is_err());
        assert!(parse_ref_name("#/components/responses/Account", "schemas").is_err());
    }
}
