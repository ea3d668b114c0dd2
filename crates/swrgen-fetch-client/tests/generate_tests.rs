use swrgen_core::config::GeneratorConfig;
use swrgen_core::ir::IrSpec;
use swrgen_core::{CodeGenerator, GeneratedFile, parse, transform};
use swrgen_fetch_client::FetchClientGenerator;

const TWILIO: &str = include_str!("../../swrgen-core/tests/fixtures/twilio-accounts.yaml");
const PETSTORE: &str = include_str!("../../swrgen-core/tests/fixtures/petstore.json");

fn twilio() -> IrSpec {
    transform::transform(&parse::from_yaml(TWILIO).unwrap()).unwrap()
}

fn petstore() -> IrSpec {
    transform::transform(&parse::from_json(PETSTORE).unwrap()).unwrap()
}

fn content<'a>(files: &'a [GeneratedFile], path: &str) -> &'a str {
    &files
        .iter()
        .find(|f| f.path == path)
        .unwrap_or_else(|| panic!("missing {path}"))
        .content
}

#[test]
fn emits_expected_files() {
    let files = FetchClientGenerator
        .generate(&twilio(), &GeneratorConfig::default())
        .unwrap();
    let paths: Vec<&str> = files.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(
        paths,
        vec!["schema.ts", "client.ts", "requests.ts", "index.ts"]
    );
    for file in &files {
        assert!(
            file.content
                .starts_with("// This file is generated by swrgen. Do not edit.\n"),
            "{} is missing the banner",
            file.path
        );
    }
}

#[test]
fn index_can_be_disabled() {
    let config = GeneratorConfig {
        index: false,
        ..GeneratorConfig::default()
    };
    let files = FetchClientGenerator.generate(&twilio(), &config).unwrap();
    assert!(files.iter().all(|f| f.path != "index.ts"));
}

#[test]
fn rendering_is_deterministic() {
    let ir = twilio();
    let config = GeneratorConfig::default();
    let first = FetchClientGenerator.generate(&ir, &config).unwrap();
    let second = FetchClientGenerator.generate(&ir, &config).unwrap();
    assert_eq!(first, second);
}

#[test]
fn wrapper_calls_client_once_and_unwraps() {
    let files = FetchClientGenerator
        .generate(&twilio(), &GeneratorConfig::default())
        .unwrap();
    let requests = content(&files, "requests.ts");

    assert!(requests.contains(
        "export async function post20100401AccountsSidJson(\n  \
         args: Schema.Post20100401AccountsSidJsonArgs,\n  \
         options?: ClientOptions,\n\
         ): Promise<Schema.Post20100401AccountsSidJsonResponse> {\n  \
         return unwrap<Schema.Post20100401AccountsSidJsonResponse>(\n    \
         await client.POST('/2010-04-01/Accounts/{Sid}.json', { ...formInit(options), ...args }),\n  \
         );\n}\n"
    ));
    // Nothing required, so the arguments default to an empty object.
    assert!(requests.contains("  args: Schema.Get20100401AccountsJsonArgs = {},\n"));
    assert!(requests.contains("export class ApiError"));
    // Caller headers are merged under the form Content-Type, never in place of it.
    assert!(requests.contains(
        "  const headers = new Headers(options?.headers);\n  \
         headers.set('Content-Type', 'application/x-www-form-urlencoded');\n  \
         return { ...options, headers, bodySerializer: formUrlEncoded };\n"
    ));
    assert!(requests.contains(
        "await client.GET('/2010-04-01/Accounts.json', { ...options, ...args }),"
    ));
    assert_eq!(requests.matches("await client.").count(), 5);
}

#[test]
fn wrapper_docs_and_deprecation() {
    let files = FetchClientGenerator
        .generate(&twilio(), &GeneratorConfig::default())
        .unwrap();
    let requests = content(&files, "requests.ts");
    assert!(requests.contains(
        "/**\n * Delete a Call record from your account.\n *\n \
         * Once the record is deleted, it will no longer appear in the API and Account Portal logs.\n \
         * @deprecated\n */\nexport async function delete20100401AccountsAccountSidCallsSidJson("
    ));

    let config = GeneratorConfig {
        no_jsdoc: true,
        ..GeneratorConfig::default()
    };
    let files = FetchClientGenerator.generate(&twilio(), &config).unwrap();
    let requests = content(&files, "requests.ts");
    assert!(!requests.contains("@deprecated"));
    assert!(!requests.contains("Delete a Call record"));
}

#[test]
fn schema_types_routes() {
    let files = FetchClientGenerator
        .generate(&twilio(), &GeneratorConfig::default())
        .unwrap();
    let schema = content(&files, "schema.ts");

    assert!(schema.contains("export type AccountEnumStatus = 'active' | 'suspended' | 'closed';\n"));
    assert!(schema.contains("  readonly sid: string;\n"));
    assert!(schema.contains("  friendly_name?: string | null;\n"));
    assert!(schema.contains("  subresource_uris?: Record<string, string>;\n"));

    assert!(schema.contains("  '/2010-04-01/Accounts/{Sid}.json': {\n    get: {\n"));
    assert!(schema.contains(
        "export type Post20100401AccountsSidJsonArgs = {\n  \
         params: {\n    path: {\n      \
         /**\n       * The Account Sid that uniquely identifies the account to fetch\n       */\n      \
         Sid: string;\n    };\n  };\n  \
         body?: { FriendlyName?: string; Status?: AccountEnumStatus };\n};\n"
    ));
    assert!(schema.contains(
        "export type Get20100401AccountsJsonResponse = ListAccountResponse;\n"
    ));
    assert!(schema.contains(
        "export type Delete20100401AccountsAccountSidCallsSidJsonResponse = void;\n"
    ));
}

#[test]
fn schema_paths_layout() {
    let files = FetchClientGenerator
        .generate(&petstore(), &GeneratorConfig::default())
        .unwrap();
    let schema = content(&files, "schema.ts");

    // Colon parameters are written in brace form for the client.
    assert!(schema.contains("  '/pets/{petId}': {\n"));
    assert!(schema.contains("          'X-Trace-Id'?: string;\n"));
    assert!(schema.contains("        path?: never;\n"));
    assert!(schema.contains(
        "      requestBody: {\n        content: {\n          'application/json': NewPet;\n"
    ));
    assert!(schema.contains("            'application/problem+json': Error;\n"));
    assert!(schema.contains("export type Pet = NewPet & { id: number };\n"));
    assert!(schema.contains("export type GetRootArgs = Record<string, never>;\n"));
    assert!(schema.contains("export type GetRootResponse = { version?: string };\n"));
}

#[test]
fn client_uses_configured_base_url() {
    let config = GeneratorConfig {
        base_url: "https://api.twilio.com".to_string(),
        ..GeneratorConfig::default()
    };
    let files = FetchClientGenerator.generate(&twilio(), &config).unwrap();
    insta::assert_snapshot!(content(&files, "client.ts"), @r"
    // This file is generated by swrgen. Do not edit.
    import createClient from 'openapi-fetch';
    import type { paths } from './schema';

    export const client = createClient<paths>({ baseUrl: 'https://api.twilio.com' });
    ");
}

#[test]
fn schema_docs_note_discriminator_and_write_only() {
    let spec = r#"
openapi: 3.1.0
info: {title: Shapes, version: '1'}
paths: {}
components:
  schemas:
    Circle:
      type: object
      properties:
        kind: {type: string}
        secret: {type: string, writeOnly: true}
    Square:
      type: object
      properties:
        kind: {type: string}
    Shape:
      oneOf:
        - $ref: '#/components/schemas/Circle'
        - $ref: '#/components/schemas/Square'
      discriminator:
        propertyName: kind
"#;
    let ir = transform::transform(&parse::from_yaml(spec).unwrap()).unwrap();
    let files = FetchClientGenerator
        .generate(&ir, &GeneratorConfig::default())
        .unwrap();
    let schema = content(&files, "schema.ts");
    assert!(schema.contains(
        "/**\n * Discriminated by `kind`.\n */\nexport type Shape = Circle | Square;"
    ));
    assert!(schema.contains("  /**\n   * @writeOnly\n   */\n  secret?: string;"));
}

#[test]
fn schema_header_and_typed_index_signature() {
    let spec = r#"
openapi: 3.1.0
info:
  title: "Usage Records\nconst injected = 1;"
  version: '2'
paths: {}
components:
  schemas:
    Usage:
      type: object
      required: [total]
      properties:
        total: {type: integer}
        unit: {type: string}
      additionalProperties: {type: integer}
    Labels:
      type: object
      properties:
        name: {type: string}
      additionalProperties: true
"#;
    let ir = transform::transform(&parse::from_yaml(spec).unwrap()).unwrap();
    let files = FetchClientGenerator
        .generate(&ir, &GeneratorConfig::default())
        .unwrap();
    let schema = content(&files, "schema.ts");
    assert!(schema.contains("// Usage Records 2\n"));
    assert!(!schema.contains("injected"));
    assert!(schema.contains("  [key: string]: number | string | undefined;\n"));
    assert!(schema.contains("  name?: string;\n  [key: string]: unknown;\n"));
}
