pub mod client;
pub mod index;
pub mod requests;
pub mod schema;

use minijinja::{Environment, Value};

/// First line of every emitted file.
pub const BANNER: &str = "// This file is generated by swrgen. Do not edit.";

/// Escape `*/` sequences that would prematurely close JSDoc comment blocks.
pub fn escape_jsdoc(value: &str) -> String {
    value.replace("*/", "*\\/")
}

/// Render `lines` as a JSDoc block that ends with `indent`, so it can be placed
/// directly in front of an indented declaration. No lines render nothing.
pub fn jsdoc(lines: &[String], indent: &str) -> String {
    if lines.is_empty() {
        return String::new();
    }
    let mut out = String::from("/**\n");
    for line in lines {
        if line.is_empty() {
            out.push_str(&format!("{indent} *\n"));
        } else {
            out.push_str(&format!("{indent} * {}\n", escape_jsdoc(line)));
        }
    }
    out.push_str(&format!("{indent} */\n{indent}"));
    out
}

/// Template environment shared by every emitter.
pub fn environment() -> Environment<'static> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.set_keep_trailing_newline(true);
    env.add_global("banner", BANNER);
    env
}

/// Register `source` under `name` and render it with `ctx`.
pub fn render(
    name: &'static str,
    source: &'static str,
    ctx: Value,
) -> Result<String, minijinja::Error> {
    let mut env = environment();
    env.add_template(name, source)?;
    let rendered = env.get_template(name)?.render(ctx)?;
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jsdoc_empty() {
        assert_eq!(jsdoc(&[], "  "), "");
    }

    #[test]
    fn test_jsdoc_block() {
        let lines = vec![
            "Fetch an account".to_string(),
            String::new(),
            "ends */ here".to_string(),
        ];
        assert_eq!(
            jsdoc(&lines, "  "),
            "/**\n   * Fetch an account\n   *\n   * ends *\\/ here\n   */\n  "
        );
    }
}
