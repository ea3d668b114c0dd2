use minijinja::context;

/// Emit `index.ts`, re-exporting each module in `modules` (names without extension).
pub fn emit_index(modules: &[&str]) -> Result<String, minijinja::Error> {
    super::render(
        "index.ts.j2",
        include_str!("../../templates/index.ts.j2"),
        context! {
            modules => modules,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reexports_in_order() {
        let out = emit_index(&["schema", "client", "requests"]).unwrap();
        assert_eq!(
            out,
            "// This file is generated by swrgen. Do not edit.\n\
             export * from './schema';\n\
             export * from './client';\n\
             export * from './requests';\n"
        );
    }
}
