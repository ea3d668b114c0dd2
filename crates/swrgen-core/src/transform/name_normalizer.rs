use heck::ToPascalCase;

use crate::ir::{HttpMethod, NormalizedName, PathPart, PathTemplate};

/// Create a `NormalizedName` from an arbitrary string.
pub fn normalize_name(name: &str) -> NormalizedName {
    NormalizedName {
        original: name.to_string(),
        pascal_case: sanitize_identifier(name).to_pascal_case(),
    }
}

/// Derive the function name for a route: the lowercase method followed by every
/// word of the path, title-cased.
///
/// Words are split on any non-alphanumeric character, so parameter braces and
/// colons disappear while parameter names are kept.
///
/// - `GET /2010-04-01/Accounts.json` → `get20100401AccountsJson`
/// - `POST /2010-04-01/Accounts/{Sid}.json` → `post20100401AccountsSidJson`
/// - `GET /` → `getRoot`
pub fn route_to_name(method: HttpMethod, template: &PathTemplate) -> String {
    let mut name = method.as_lower().to_string();
    let mut has_words = false;

    for segment in &template.segments {
        for part in &segment.parts {
            let text = match part {
                PathPart::Literal(text) | PathPart::Param(text) => text,
            };
            for word in text
                .split(|c: char| !c.is_ascii_alphanumeric())
                .filter(|w| !w.is_empty())
            {
                name.push_str(&title_case(word));
                has_words = true;
            }
        }
    }

    // A bare method name would be a reserved word for `delete`.
    if !has_words {
        name.push_str("Root");
    }
    name
}

/// Uppercase the first character and keep the rest as written.
fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

const RESERVED: &[&str] = &[
    "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete",
    "do", "else", "enum", "export", "extends", "false", "finally", "for", "function", "if",
    "import", "in", "instanceof", "new", "null", "return", "super", "switch", "this", "throw",
    "true", "try", "typeof", "var", "void", "while", "with", "yield", "let", "static",
    "implements", "interface", "package", "private", "protected", "public", "await",
];

/// Names the generated modules declare or import themselves. `index.ts` re-exports
/// every module, so route and schema names share one namespace with these.
pub const GENERATED_NAMES: &[&str] = &[
    "paths",
    "createClient",
    "client",
    "Schema",
    "ClientOptions",
    "ApiError",
    "unwrap",
    "formUrlEncoded",
    "formInit",
    "useSWR",
    "useSWRMutation",
    "Key",
    "SWRConfiguration",
    "SWRMutationConfiguration",
    "requests",
    "QueryHookOptions",
    "MutationHookOptions",
];

/// Whether `name` can be used as a TypeScript function name that does not shadow a
/// generated helper.
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_ascii_alphabetic() || first == '_' || first == '$') {
        return false;
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        && !RESERVED.contains(&name)
        && !GENERATED_NAMES.contains(&name)
}

/// Sanitize a string to be a valid identifier.
fn sanitize_identifier(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut prev_was_separator = false;

    for (i, ch) in name.chars().enumerate() {
        if ch.is_alphanumeric() {
            if i == 0 && ch.is_ascii_digit() {
                result.push('_');
            }
            if prev_was_separator && !result.is_empty() {
                result.push('_');
            }
            result.push(ch);
            prev_was_separator = false;
        } else {
            prev_was_separator = true;
        }
    }

    if result.is_empty() {
        return "unnamed".to_string();
    }

    result
}
