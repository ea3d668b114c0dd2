use indexmap::IndexMap;
use minijinja::{Value, context};
use swrgen_core::ir::{
    IrObjectSchema, IrOperation, IrParameterLocation, IrSchema, IrSpec, IrType,
};

use super::jsdoc;
use crate::type_mapper::{ir_type_to_ts, property_key, quote, response_union, status_key};

const LOCATIONS: [IrParameterLocation; 4] = [
    IrParameterLocation::Path,
    IrParameterLocation::Query,
    IrParameterLocation::Header,
    IrParameterLocation::Cookie,
];

/// Emit `schema.ts`: component types, the `paths` interface that types the client, and
/// the per-route argument and response aliases.
pub fn emit_schema(ir: &IrSpec) -> Result<String, minijinja::Error> {
    let schemas: Vec<Value> = ir.schemas.iter().map(schema_to_ctx).collect();
    let paths = paths_ctx(ir);
    let routes: Vec<Value> = ir.operations.iter().map(route_ctx).collect();

    super::render(
        "schema.ts.j2",
        include_str!("../../templates/schema.ts.j2"),
        context! {
            title => ir.info.title.lines().next().unwrap_or_default().trim(),
            version => ir.info.version.clone(),
            schemas => schemas,
            paths => paths,
            routes => routes,
        },
    )
}

fn doc_lines(description: Option<&str>) -> Vec<String> {
    description
        .map(|d| d.trim().lines().map(|l| l.trim_end().to_string()).collect())
        .unwrap_or_default()
}

fn schema_to_ctx(schema: &IrSchema) -> Value {
    let name = schema.name().pascal_case.clone();
    let docs = jsdoc(&doc_lines(schema.description()), "");
    match schema {
        IrSchema::Object(obj) => object_to_ctx(obj, name, docs),
        IrSchema::Enum(e) => {
            let variants: Vec<String> = e.variants.iter().map(|v| quote(v)).collect();
            context! { kind => "alias", name => name, jsdoc => docs, target => variants.join(" | ") }
        }
        IrSchema::Alias(a) => {
            context! { kind => "alias", name => name, jsdoc => docs, target => ir_type_to_ts(&a.target) }
        }
        IrSchema::Union(u) => {
            let mut lines = doc_lines(u.description.as_deref());
            if let Some(d) = &u.discriminator {
                lines.push(format!("Discriminated by `{}`.", d.property_name));
            }
            let docs = jsdoc(&lines, "");
            let variants: Vec<String> = u.variants.iter().map(ir_type_to_ts).collect();
            let target = if variants.is_empty() {
                "never".to_string()
            } else {
                variants.join(" | ")
            };
            context! { kind => "alias", name => name, jsdoc => docs, target => target }
        }
    }
}

fn object_to_ctx(obj: &IrObjectSchema, name: String, docs: String) -> Value {
    let fields: Vec<Value> = obj
        .fields
        .iter()
        .map(|f| {
            let mut lines = doc_lines(f.description.as_deref());
            if f.write_only {
                lines.push("@writeOnly".to_string());
            }
            context! {
                key => property_key(&f.original_name),
                ts_type => ir_type_to_ts(&f.field_type),
                optional => !f.required,
                readonly => f.read_only,
                jsdoc => jsdoc(&lines, "  "),
            }
        })
        .collect();

    context! {
        kind => "object",
        name => name,
        jsdoc => docs,
        fields => fields,
        index_signature => index_signature(obj),
    }
}

/// Value type of the `[key: string]` signature. Declared properties must be assignable
/// to it, so their types are folded in.
fn index_signature(obj: &IrObjectSchema) -> Option<String> {
    let value = obj.additional_properties.as_ref()?;
    if *value == IrType::Any {
        return Some("unknown".to_string());
    }
    let mut members = vec![value.clone()];
    members.extend(obj.fields.iter().map(|f| f.field_type.clone()));
    let mut ts = ir_type_to_ts(&IrType::Union(members));
    if obj.fields.iter().any(|f| !f.required) {
        ts.push_str(" | undefined");
    }
    Some(ts)
}

/// Group routes by path in first-seen order.
fn paths_ctx(ir: &IrSpec) -> Vec<Value> {
    let mut grouped: IndexMap<String, Vec<Value>> = IndexMap::new();
    for op in &ir.operations {
        grouped
            .entry(op.template.to_brace_form())
            .or_default()
            .push(path_operation_ctx(op));
    }
    grouped
        .into_iter()
        .map(|(path, operations)| context! { key => quote(&path), operations => operations })
        .collect()
}

fn path_operation_ctx(op: &IrOperation) -> Value {
    let parameters: Vec<Value> = LOCATIONS
        .iter()
        .map(|loc| match param_group_ctx(op, *loc) {
            Some(group) => group,
            None => context! { location => loc.as_str(), never => true },
        })
        .collect();

    let request_body = op.request_body.as_ref().map(|body| {
        context! {
            optional => !body.required,
            content_type => quote(&body.content_type),
            ts_type => ir_type_to_ts(&body.body_type),
        }
    });

    let responses: Vec<Value> = op
        .responses
        .iter()
        .map(|r| {
            context! {
                status => status_key(&r.status),
                content_type => r.content_type.as_deref().map(quote),
                ts_type => ir_type_to_ts(&r.response_type),
            }
        })
        .collect();

    context! {
        method => op.method.as_lower(),
        parameters => parameters,
        request_body => request_body,
        responses => responses,
    }
}

fn param_group_ctx(op: &IrOperation, location: IrParameterLocation) -> Option<Value> {
    let params: Vec<_> = op.params_in(location).collect();
    if params.is_empty() {
        return None;
    }
    let fields: Vec<Value> = params
        .iter()
        .map(|p| {
            context! {
                key => property_key(&p.original_name),
                ts_type => ir_type_to_ts(&p.param_type),
                optional => !p.required,
                jsdoc => jsdoc(&doc_lines(p.description.as_deref()), "      "),
            }
        })
        .collect();
    Some(context! {
        location => location.as_str(),
        optional => !params.iter().any(|p| p.required),
        fields => fields,
    })
}

/// `{Pascal}Args` and `{Pascal}Response` for one route.
fn route_ctx(op: &IrOperation) -> Value {
    let groups: Vec<Value> = LOCATIONS
        .iter()
        .filter_map(|loc| param_group_ctx(op, *loc))
        .collect();
    let params_optional = !op.parameters.iter().any(|p| p.required);
    let empty = groups.is_empty() && op.request_body.is_none();

    let body = op.request_body.as_ref().map(|b| {
        context! {
            optional => !b.required,
            ts_type => ir_type_to_ts(&b.body_type),
        }
    });

    context! {
        args_type => op.name.args_type(),
        response_type => op.name.response_type(),
        route => op.route(),
        empty => empty,
        groups => groups,
        params_optional => params_optional,
        body => body,
        response => response_union(&op.success_types()),
    }
}

/// Whether a route's argument object may be omitted, so the wrapper can default it to `{}`.
pub fn args_optional(op: &IrOperation) -> bool {
    !op.parameters.iter().any(|p| p.required)
        && !op.request_body.as_ref().is_some_and(|b| b.required)
}
