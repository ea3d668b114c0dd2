use indexmap::IndexMap;

use crate::ir::{IrResponse, IrType};
use crate::parse::media_type::preferred_content;
use crate::parse::response::ResponseOrRef;

use super::schema_resolver::schema_or_ref_to_ir_type;

/// Convert an operation's `responses` map into IR responses, keeping declaration order.
///
/// Each response is typed from its preferred content entry. A response without
/// content, or with a content entry that has no schema, is `Void` or `Any`
/// respectively.
pub fn collect_responses(responses: &IndexMap<String, ResponseOrRef>) -> Vec<IrResponse> {
    responses
        .iter()
        .filter_map(|(status, resp)| match resp {
            ResponseOrRef::Response(r) => {
                let (content_type, response_type) = match preferred_content(&r.content) {
                    Some((ct, mt)) => (
                        Some(ct.clone()),
                        mt.schema
                            .as_ref()
                            .map(schema_or_ref_to_ir_type)
                            .unwrap_or(IrType::Any),
                    ),
                    None => (None, IrType::Void),
                };
                Some(IrResponse {
                    status: status.clone(),
                    content_type,
                    response_type,
                    description: Some(r.description.clone()).filter(|d| !d.is_empty()),
                })
            }
            ResponseOrRef::Ref { .. } => None, // already inlined by the resolver
        })
        .collect()
}
