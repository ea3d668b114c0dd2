use minijinja::{Value, context};
use swrgen_core::ir::{IrOperation, IrSpec};
use swrgen_fetch_client::emitters::jsdoc;
use swrgen_fetch_client::emitters::requests::route_doc;
use swrgen_fetch_client::emitters::schema::args_optional;
use swrgen_fetch_client::type_mapper::quote;

/// Emit `hooks.ts`: a cache-key function and `useSWR` hook per GET route, and a
/// `useSWRMutation` hook per route with any other method.
pub fn emit_hooks(ir: &IrSpec, no_jsdoc: bool) -> Result<String, minijinja::Error> {
    let hooks: Vec<Value> = ir
        .operations
        .iter()
        .map(|op| {
            if op.is_query() {
                query_ctx(op, no_jsdoc)
            } else {
                mutation_ctx(op, no_jsdoc)
            }
        })
        .collect();

    swrgen_fetch_client::emitters::render(
        "hooks.ts.j2",
        include_str!("../../templates/hooks.ts.j2"),
        context! {
            hooks => hooks,
            has_queries => ir.queries().next().is_some(),
            has_mutations => ir.mutations().next().is_some(),
        },
    )
}

fn query_ctx(op: &IrOperation, no_jsdoc: bool) -> Value {
    log::debug!("query hook {} keyed by {}", op.name.hook(), op.key_path());
    context! {
        kind => "query",
        jsdoc => jsdoc(&route_doc(op, no_jsdoc), ""),
        hook => op.name.hook(),
        key_function => op.name.key_function(),
        function => op.name.function.clone(),
        args_type => op.name.args_type(),
        response_type => op.name.response_type(),
        args_default => args_optional(op),
        method => quote(op.method.as_str()),
        key_path => quote(&op.key_path()),
    }
}

fn mutation_ctx(op: &IrOperation, no_jsdoc: bool) -> Value {
    log::debug!("mutation hook {} keyed by {}", op.name.hook(), op.mutation_key());
    context! {
        kind => "mutation",
        jsdoc => jsdoc(&route_doc(op, no_jsdoc), ""),
        hook => op.name.hook(),
        function => op.name.function.clone(),
        args_type => op.name.args_type(),
        response_type => op.name.response_type(),
        mutation_key => quote(&op.mutation_key()),
    }
}
