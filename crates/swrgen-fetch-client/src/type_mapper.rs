use swrgen_core::ir::IrType;

/// Map an `IrType` to its TypeScript type string representation.
pub fn ir_type_to_ts(ir_type: &IrType) -> String {
    match ir_type {
        IrType::String | IrType::DateTime => "string".to_string(),
        IrType::StringLiteral(s) => quote(s),
        IrType::Number | IrType::Integer => "number".to_string(),
        IrType::Boolean => "boolean".to_string(),
        IrType::Null => "null".to_string(),
        IrType::Binary => "Blob".to_string(),
        IrType::Any => "unknown".to_string(),
        IrType::Void => "void".to_string(),
        IrType::Ref(name) => name.clone(),
        IrType::Array(inner) => format!("{}[]", grouped(inner)),
        IrType::Map(value_type) => format!("Record<string, {}>", ir_type_to_ts(value_type)),
        IrType::Object(fields) => {
            if fields.is_empty() {
                return "Record<string, unknown>".to_string();
            }
            let field_strs: Vec<String> = fields
                .iter()
                .map(|(name, ty, required)| {
                    let optional = if *required { "" } else { "?" };
                    format!("{}{optional}: {}", property_key(name), ir_type_to_ts(ty))
                })
                .collect();
            format!("{{ {} }}", field_strs.join("; "))
        }
        IrType::Union(variants) => join_types(variants, " | ", false),
        IrType::Intersection(parts) => join_types(parts, " & ", true),
    }
}

/// Join the distinct members of a union or intersection. An empty union is `never`.
fn join_types(types: &[IrType], separator: &str, group_members: bool) -> String {
    let mut rendered: Vec<String> = Vec::new();
    for t in types {
        let ts = if group_members {
            grouped(t)
        } else {
            ir_type_to_ts(t)
        };
        if !rendered.contains(&ts) {
            rendered.push(ts);
        }
    }
    match rendered.len() {
        0 if group_members => "unknown".to_string(),
        0 => "never".to_string(),
        _ => rendered.join(separator),
    }
}

/// Wrap unions and intersections in parentheses where they bind tighter than `[]` or `&`.
fn grouped(ir_type: &IrType) -> String {
    let ts = ir_type_to_ts(ir_type);
    match ir_type {
        IrType::Union(v) | IrType::Intersection(v) if v.len() > 1 => format!("({ts})"),
        _ => ts,
    }
}

/// Union of a route's success payloads, or `void` when it returns nothing.
pub fn response_union(types: &[IrType]) -> String {
    if types.is_empty() {
        "void".to_string()
    } else {
        join_types(types, " | ", false)
    }
}

/// Single-quoted TypeScript string literal.
pub fn quote(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('\'', "\\'");
    format!("'{escaped}'")
}

/// An object key as written in a type literal: bare when it is a valid identifier,
/// quoted otherwise.
pub fn property_key(name: &str) -> String {
    let mut chars = name.chars();
    let bare = match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' || first == '$' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    };
    if bare { name.to_string() } else { quote(name) }
}

/// Response map key: numeric status codes are bare, everything else goes through
/// [`property_key`].
pub fn status_key(status: &str) -> String {
    if !status.is_empty() && status.chars().all(|c| c.is_ascii_digit()) {
        status.to_string()
    } else {
        property_key(status)
    }
}
