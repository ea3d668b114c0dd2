use minijinja::context;

use crate::type_mapper::quote;

/// Emit `client.ts`: the single `openapi-fetch` client every wrapper calls through.
pub fn emit_client(base_url: &str) -> Result<String, minijinja::Error> {
    super::render(
        "client.ts.j2",
        include_str!("../../templates/client.ts.j2"),
        context! {
            base_url => quote(base_url),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_root() {
        let out = emit_client("/").unwrap();
        assert!(out.starts_with(super::super::BANNER));
        assert!(out.contains("import createClient from 'openapi-fetch';"));
        assert!(out.contains("export const client = createClient<paths>({ baseUrl: '/' });"));
        assert!(out.ends_with(";\n"));
    }

    #[test]
    fn test_custom_base_url() {
        let out = emit_client("https://api.twilio.com").unwrap();
        assert!(out.contains("baseUrl: 'https://api.twilio.com'"));
    }
}
