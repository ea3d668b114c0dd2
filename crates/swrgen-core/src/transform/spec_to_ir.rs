use indexmap::IndexMap;

use crate::error::TransformError;
use crate::ir::*;
use crate::parse::media_type::preferred_content;
use crate::parse::operation::Operation;
use crate::parse::parameter::{ParameterLocation, ParameterOrRef};
use crate::parse::ref_resolve::RefResolver;
use crate::parse::request_body::RequestBodyOrRef;
use crate::parse::spec::OpenApiSpec;

use super::name_normalizer::{GENERATED_NAMES, is_valid_identifier, route_to_name};
use super::responses::collect_responses;
use super::schema_resolver::{schema_or_ref_to_ir_schema, schema_or_ref_to_ir_type};

/// Options controlling how route identifiers are resolved.
#[derive(Debug, Clone, Default)]
pub struct TransformOptions {
    /// Derived function name → custom function name.
    pub aliases: IndexMap<String, String>,
}

/// Transform a parsed OpenAPI spec into the fully resolved IR.
pub fn transform(spec: &OpenApiSpec) -> Result<IrSpec, TransformError> {
    transform_with_options(spec, &TransformOptions::default())
}

/// Transform with explicit naming options.
pub fn transform_with_options(
    spec: &OpenApiSpec,
    options: &TransformOptions,
) -> Result<IrSpec, TransformError> {
    // Phase 1: Inline component parameters, bodies and responses
    let resolver = RefResolver::new(spec);
    let resolved = resolver.resolve_spec(spec)?;

    // Phase 2: Convert component schemas to IR schemas
    let schemas = resolve_schemas(&resolved);

    // Phase 3: Build one route descriptor per (method, path)
    let operations = resolve_operations(&resolved, options)?;

    // Phase 4: Every emitted name must be unique
    check_collisions(&schemas, &operations)?;

    let info = IrInfo {
        title: resolved.info.title.clone(),
        description: resolved.info.description.clone(),
        version: resolved.info.version.clone(),
    };

    let servers = resolved
        .servers
        .iter()
        .map(|s| IrServer {
            url: s.url.clone(),
            description: s.description.clone(),
        })
        .collect();

    Ok(IrSpec {
        info,
        servers,
        schemas,
        operations,
    })
}

fn resolve_schemas(spec: &OpenApiSpec) -> Vec<IrSchema> {
    spec.components
        .as_ref()
        .map(|components| {
            components
                .schemas
                .iter()
                .map(|(name, schema_or_ref)| schema_or_ref_to_ir_schema(name, schema_or_ref))
                .collect()
        })
        .unwrap_or_default()
}

fn resolve_operations(
    spec: &OpenApiSpec,
    options: &TransformOptions,
) -> Result<Vec<IrOperation>, TransformError> {
    let mut operations = Vec::new();

    for (path, path_item) in &spec.paths {
        let template = PathTemplate::parse(path);
        let path_params = resolve_parameters(&path_item.parameters);
        for (method, op) in path_item.operations() {
            operations.push(build_operation(
                method,
                path,
                &template,
                op,
                &path_params,
                options,
            )?);
        }
    }

    Ok(operations)
}

fn build_operation(
    method: HttpMethod,
    path: &str,
    template: &PathTemplate,
    op: &Operation,
    path_params: &[IrParameter],
    options: &TransformOptions,
) -> Result<IrOperation, TransformError> {
    let derived = route_to_name(method, template);
    let function = match options.aliases.get(&derived) {
        Some(alias) => {
            if !is_valid_identifier(alias) {
                return Err(TransformError::InvalidIdentifier {
                    alias: alias.clone(),
                    route: format!("{} {}", method.as_str(), path),
                });
            }
            alias.clone()
        }
        None => derived,
    };
    log::debug!("{} {} -> {}", method.as_str(), path, function);

    let parameters = merge_parameters(path_params, resolve_parameters(&op.parameters), template);

    let request_body = op.request_body.as_ref().and_then(resolve_request_body);

    Ok(IrOperation {
        name: RouteName::new(function),
        method,
        path: path.to_string(),
        template: template.clone(),
        summary: op.summary.clone(),
        description: op.description.clone(),
        tags: op.tags.clone(),
        parameters,
        request_body,
        responses: collect_responses(&op.responses),
        deprecated: op.deprecated.unwrap_or(false),
    })
}

/// Path-item parameters first, each replaced in place by an operation parameter with the
/// same name and location; remaining operation parameters follow. Template placeholders
/// nobody declared become required string path parameters.
fn merge_parameters(
    path_params: &[IrParameter],
    op_params: Vec<IrParameter>,
    template: &PathTemplate,
) -> Vec<IrParameter> {
    let mut merged: Vec<IrParameter> = path_params.to_vec();
    for param in op_params {
        match merged
            .iter_mut()
            .find(|p| p.original_name == param.original_name && p.location == param.location)
        {
            Some(existing) => *existing = param,
            None => merged.push(param),
        }
    }

    for name in template.param_names() {
        let declared = merged
            .iter()
            .any(|p| p.location == IrParameterLocation::Path && p.original_name == name);
        if !declared {
            log::debug!("synthesizing undeclared path parameter `{name}`");
            merged.push(IrParameter {
                original_name: name.to_string(),
                location: IrParameterLocation::Path,
                param_type: IrType::String,
                required: true,
                description: None,
            });
        }
    }

    merged
}

fn resolve_parameters(params: &[ParameterOrRef]) -> Vec<IrParameter> {
    params
        .iter()
        .filter_map(|p| match p {
            ParameterOrRef::Parameter(param) => {
                let location = match param.location {
                    ParameterLocation::Path => IrParameterLocation::Path,
                    ParameterLocation::Query => IrParameterLocation::Query,
                    ParameterLocation::Header => IrParameterLocation::Header,
                    ParameterLocation::Cookie => IrParameterLocation::Cookie,
                };
                let param_type = param
                    .schema
                    .as_ref()
                    .map(schema_or_ref_to_ir_type)
                    .unwrap_or(IrType::String);
                Some(IrParameter {
                    original_name: param.name.clone(),
                    location,
                    param_type,
                    // Path parameters are always required.
                    required: param.required || location == IrParameterLocation::Path,
                    description: param.description.clone(),
                })
            }
            ParameterOrRef::Ref { .. } => None, // Should already be resolved
        })
        .collect()
}

fn resolve_request_body(body: &RequestBodyOrRef) -> Option<IrRequestBody> {
    match body {
        RequestBodyOrRef::RequestBody(rb) => {
            let (content_type, mt) = preferred_content(&rb.content)?;

            let body_type = mt
                .schema
                .as_ref()
                .map(schema_or_ref_to_ir_type)
                .unwrap_or(IrType::Any);

            Some(IrRequestBody {
                body_type,
                required: rb.required,
                content_type: content_type.clone(),
                description: rb.description.clone(),
            })
        }
        RequestBodyOrRef::Ref { .. } => None, // Should already be resolved
    }
}

/// Component types, route functions, hooks, key functions and route types all land in
/// one re-exported namespace, next to the generated helpers.
fn check_collisions(
    schemas: &[IrSchema],
    operations: &[IrOperation],
) -> Result<(), TransformError> {
    let mut owners: IndexMap<String, String> = GENERATED_NAMES
        .iter()
        .map(|name| (name.to_string(), "generated helper".to_string()))
        .collect();

    for schema in schemas {
        let owner = format!("schema {}", schema.name());
        claim(&mut owners, schema.name().pascal_case.clone(), &owner)?;
    }
    for op in operations {
        let owner = op.route();
        for name in op.declared_names() {
            claim(&mut owners, name, &owner)?;
        }
    }
    Ok(())
}

fn claim(
    owners: &mut IndexMap<String, String>,
    name: String,
    owner: &str,
) -> Result<(), TransformError> {
    if let Some(first) = owners.get(&name) {
        return Err(TransformError::Collision {
            identifier: name,
            first: first.clone(),
            second: owner.to_string(),
        });
    }
    owners.insert(name, owner.to_string());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    const ACCOUNTS: &str = r##"
openapi: 3.0.1
info: {title: Accounts, version: 1.0.0}
paths:
  /2010-04-01/Accounts/{Sid}.json:
    parameters:
      - name: Sid
        in: path
        required: true
        schema: {type: string}
      - name: Verbose
        in: query
        schema: {type: boolean}
    get:
      parameters:
        - name: Verbose
          in: query
          required: true
          schema: {type: integer}
      responses:
        '200':
          description: OK
          content:
            application/json:
              schema: {type: object, properties: {sid: {type: string}}}
    post:
      requestBody:
        content:
          application/x-www-form-urlencoded:
            schema: {type: object, properties: {FriendlyName: {type: string}}}
      responses:
        '200':
          description: OK
  /2010-04-01/Accounts/{AccountSid}/Calls/{Sid}.json:
    delete:
      responses:
        '204':
          description: Deleted
"##;

    #[test]
    fn test_one_descriptor_per_method_and_path() {
        let ir = transform(&parse::from_yaml(ACCOUNTS).unwrap()).unwrap();
        let names: Vec<&str> = ir
            .operations
            .iter()
            .map(|op| op.name.function.as_str())
            .collect();
        assert_eq!(
            names,
            vec![
                "get20100401AccountsSidJson",
                "post20100401AccountsSidJson",
                "delete20100401AccountsAccountSidCallsSidJson",
            ]
        );
    }

    #[test]
    fn test_operation_param_overrides_path_item_param() {
        let ir = transform(&parse::from_yaml(ACCOUNTS).unwrap()).unwrap();
        let get = &ir.operations[0];
        assert_eq!(get.parameters.len(), 2);
        assert_eq!(get.parameters[0].original_name, "Sid");
        let verbose = &get.parameters[1];
        assert!(verbose.required);
        assert_eq!(verbose.param_type, IrType::Integer);
    }

    #[test]
    fn test_undeclared_path_params_are_synthesized() {
        let ir = transform(&parse::from_yaml(ACCOUNTS).unwrap()).unwrap();
        let delete = &ir.operations[2];
        let names: Vec<&str> = delete
            .params_in(IrParameterLocation::Path)
            .map(|p| p.original_name.as_str())
            .collect();
        assert_eq!(names, vec!["AccountSid", "Sid"]);
        assert!(delete.parameters.iter().all(|p| p.required));
    }

    #[test]
    fn test_form_body_is_kept() {
        let ir = transform(&parse::from_yaml(ACCOUNTS).unwrap()).unwrap();
        let body = ir.operations[1].request_body.as_ref().unwrap();
        assert_eq!(body.content_type, "application/x-www-form-urlencoded");
        assert!(!body.required);
    }

    #[test]
    fn test_alias_renames_function_but_not_keys() {
        let mut options = TransformOptions::default();
        options.aliases.insert(
            "get20100401AccountsSidJson".to_string(),
            "fetchAccount".to_string(),
        );
        let ir = transform_with_options(&parse::from_yaml(ACCOUNTS).unwrap(), &options).unwrap();
        let get = &ir.operations[0];
        assert_eq!(get.name.function, "fetchAccount");
        assert_eq!(get.key_path(), "/2010-04-01/Accounts/:Sid.json");
    }

    #[test]
    fn test_invalid_alias_is_rejected() {
        let mut options = TransformOptions::default();
        options.aliases.insert(
            "post20100401AccountsSidJson".to_string(),
            "update-account".to_string(),
        );
        let err =
            transform_with_options(&parse::from_yaml(ACCOUNTS).unwrap(), &options).unwrap_err();
        assert!(matches!(
            err,
            TransformError::InvalidIdentifier { ref alias, .. } if alias == "update-account"
        ));
    }

    #[test]
    fn test_alias_can_cause_collision() {
        let mut options = TransformOptions::default();
        options.aliases.insert(
            "post20100401AccountsSidJson".to_string(),
            "get20100401AccountsSidJson".to_string(),
        );
        let err =
            transform_with_options(&parse::from_yaml(ACCOUNTS).unwrap(), &options).unwrap_err();
        match err {
            TransformError::Collision {
                identifier,
                first,
                second,
            } => {
                assert_eq!(identifier, "get20100401AccountsSidJson");
                assert_eq!(first, "GET /2010-04-01/Accounts/{Sid}.json");
                assert_eq!(second, "POST /2010-04-01/Accounts/{Sid}.json");
            }
            other => panic!("expected collision, got {other:?}"),
        }
    }

    #[test]
    fn test_aliases_differing_in_case_collide_on_hook() {
        let mut options = TransformOptions::default();
        options.aliases.insert(
            "get20100401AccountsSidJson".to_string(),
            "fooBar".to_string(),
        );
        options.aliases.insert(
            "post20100401AccountsSidJson".to_string(),
            "FooBar".to_string(),
        );
        let err =
            transform_with_options(&parse::from_yaml(ACCOUNTS).unwrap(), &options).unwrap_err();
        match err {
            TransformError::Collision {
                identifier,
                first,
                second,
            } => {
                assert_eq!(identifier, "useFooBar");
                assert_eq!(first, "GET /2010-04-01/Accounts/{Sid}.json");
                assert_eq!(second, "POST /2010-04-01/Accounts/{Sid}.json");
            }
            other => panic!("expected collision, got {other:?}"),
        }
    }

    #[test]
    fn test_alias_naming_a_helper_is_rejected() {
        let mut options = TransformOptions::default();
        options.aliases.insert(
            "get20100401AccountsSidJson".to_string(),
            "unwrap".to_string(),
        );
        let err =
            transform_with_options(&parse::from_yaml(ACCOUNTS).unwrap(), &options).unwrap_err();
        assert!(matches!(
            err,
            TransformError::InvalidIdentifier { ref alias, .. } if alias == "unwrap"
        ));
    }

    fn collision_identifier(yaml: &str) -> String {
        match transform(&parse::from_yaml(yaml).unwrap()).unwrap_err() {
            TransformError::Collision { identifier, .. } => identifier,
            other => panic!("expected collision, got {other:?}"),
        }
    }

    #[test]
    fn test_schema_names_normalizing_alike_collide() {
        let yaml = r#"
openapi: 3.0.3
info: {title: Calls, version: '1'}
paths: {}
components:
  schemas:
    call-list: {type: object, properties: {a: {type: string}}}
    CallList: {type: object, properties: {b: {type: number}}}
"#;
        assert_eq!(collision_identifier(yaml), "CallList");
    }

    #[test]
    fn test_schema_colliding_with_route_type() {
        let yaml = r#"
openapi: 3.0.3
info: {title: Calls, version: '1'}
paths:
  /calls:
    get:
      responses:
        '200': {description: OK}
components:
  schemas:
    GetCallsResponse: {type: string}
"#;
        assert_eq!(collision_identifier(yaml), "GetCallsResponse");
    }

    #[test]
    fn test_schema_colliding_with_helper() {
        let yaml = r#"
openapi: 3.0.3
info: {title: Errors, version: '1'}
paths: {}
components:
  schemas:
    ApiError: {type: object, properties: {code: {type: integer}}}
"#;
        match transform(&parse::from_yaml(yaml).unwrap()).unwrap_err() {
            TransformError::Collision {
                identifier,
                first,
                second,
            } => {
                assert_eq!(identifier, "ApiError");
                assert_eq!(first, "generated helper");
                assert_eq!(second, "schema ApiError");
            }
            other => panic!("expected collision, got {other:?}"),
        }
    }
}
