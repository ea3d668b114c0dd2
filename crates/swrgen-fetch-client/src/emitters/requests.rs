use minijinja::{Value, context};
use swrgen_core::ir::{IrOperation, IrSpec};

use super::jsdoc;
use super::schema::args_optional;
use crate::type_mapper::quote;

const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// Emit `requests.ts`: one wrapper per route that performs a single client call and
/// unwraps the result or throws `ApiError`.
pub fn emit_requests(ir: &IrSpec, no_jsdoc: bool) -> Result<String, minijinja::Error> {
    let operations: Vec<Value> = ir
        .operations
        .iter()
        .map(|op| operation_ctx(op, no_jsdoc))
        .collect();
    let has_form = ir.operations.iter().any(is_form);

    super::render(
        "requests.ts.j2",
        include_str!("../../templates/requests.ts.j2"),
        context! {
            operations => operations,
            has_form => has_form,
        },
    )
}

fn is_form(op: &IrOperation) -> bool {
    op.request_body
        .as_ref()
        .is_some_and(|b| b.content_type == FORM_URLENCODED)
}

/// Doc lines for a route's wrapper and hooks, with `@deprecated` appended when flagged.
pub fn route_doc(op: &IrOperation, no_jsdoc: bool) -> Vec<String> {
    if no_jsdoc {
        return Vec::new();
    }
    let mut lines = op.doc_lines();
    if op.deprecated {
        lines.push("@deprecated".to_string());
    }
    lines
}

fn operation_ctx(op: &IrOperation, no_jsdoc: bool) -> Value {
    context! {
        jsdoc => jsdoc(&route_doc(op, no_jsdoc), ""),
        function => op.name.function.clone(),
        args_type => op.name.args_type(),
        response_type => op.name.response_type(),
        args_default => args_optional(op),
        method => op.method.as_str(),
        path => quote(&op.template.to_brace_form()),
        form => is_form(op),
    }
}
