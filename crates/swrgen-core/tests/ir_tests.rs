use swrgen_core::error::TransformError;
use swrgen_core::ir::{HttpMethod, IrParameterLocation, IrSchema, IrType};
use swrgen_core::parse;
use swrgen_core::transform;

const TWILIO: &str = include_str!("fixtures/twilio-accounts.yaml");
const PETSTORE: &str = include_str!("fixtures/petstore.json");
const COLLIDING: &str = include_str!("fixtures/colliding-routes.yaml");

#[test]
fn transform_twilio_identifiers() {
    let spec = parse::from_yaml(TWILIO).unwrap();
    let ir = transform::transform(&spec).unwrap();

    let names: Vec<&str> = ir
        .operations
        .iter()
        .map(|op| op.name.function.as_str())
        .collect();
    assert_eq!(
        names,
        vec![
            "get20100401AccountsJson",
            "post20100401AccountsJson",
            "get20100401AccountsSidJson",
            "post20100401AccountsSidJson",
            "delete20100401AccountsAccountSidCallsSidJson",
        ]
    );

    let list = &ir.operations[0];
    assert!(list.is_query());
    assert_eq!(list.name.hook(), "useGet20100401AccountsJson");
    assert_eq!(list.name.key_function(), "getGet20100401AccountsJsonKey");
    assert_eq!(list.key_path(), "/2010-04-01/Accounts.json");

    let update = &ir.operations[3];
    assert!(!update.is_query());
    assert_eq!(update.mutation_key(), "POST /2010-04-01/Accounts/:Sid.json");

    let delete = &ir.operations[4];
    assert_eq!(
        delete.mutation_key(),
        "DELETE /2010-04-01/Accounts/:AccountSid/Calls/:Sid.json"
    );
}

#[test]
fn transform_twilio_shapes() {
    let spec = parse::from_yaml(TWILIO).unwrap();
    let ir = transform::transform(&spec).unwrap();

    let list = &ir.operations[0];
    let query: Vec<&str> = list
        .params_in(IrParameterLocation::Query)
        .map(|p| p.original_name.as_str())
        .collect();
    assert_eq!(query, vec!["FriendlyName", "Status", "PageSize"]);
    assert_eq!(
        list.success_types(),
        vec![IrType::Ref("ListAccountResponse".to_string())]
    );
    // Identical summary and description are not repeated.
    assert_eq!(list.doc_lines().len(), 1);

    let fetch = &ir.operations[2];
    let sid = fetch
        .params_in(IrParameterLocation::Path)
        .next()
        .expect("path-item parameter is inherited");
    assert_eq!(sid.original_name, "Sid");
    assert!(sid.required);

    let delete = &ir.operations[4];
    assert!(delete.deprecated);
    assert!(delete.success_types().is_empty());
    assert_eq!(delete.params_in(IrParameterLocation::Path).count(), 2);
    assert_eq!(delete.doc_lines().len(), 3);
}

#[test]
fn transform_twilio_schemas() {
    let spec = parse::from_yaml(TWILIO).unwrap();
    let ir = transform::transform(&spec).unwrap();

    let names: Vec<&str> = ir
        .schemas
        .iter()
        .map(|s| s.name().pascal_case.as_str())
        .collect();
    assert_eq!(
        names,
        vec!["AccountEnumStatus", "ApiV2010Account", "ListAccountResponse"]
    );

    match &ir.schemas[0] {
        IrSchema::Enum(e) => assert_eq!(e.variants, vec!["active", "suspended", "closed"]),
        other => panic!("expected enum, got {other:?}"),
    }

    match &ir.schemas[1] {
        IrSchema::Object(obj) => {
            let friendly = &obj.fields[1];
            assert_eq!(friendly.original_name, "friendly_name");
            assert!(friendly.field_type.is_nullable());
            assert_eq!(
                obj.fields[2].field_type,
                IrType::Ref("AccountEnumStatus".to_string())
            );
        }
        other => panic!("expected object, got {other:?}"),
    }
}

#[test]
fn transform_petstore_json() {
    let spec = parse::from_json(PETSTORE).unwrap();
    let ir = transform::transform(&spec).unwrap();

    let names: Vec<&str> = ir
        .operations
        .iter()
        .map(|op| op.name.function.as_str())
        .collect();
    assert_eq!(names, vec!["getPets", "postPets", "getPetsPetId", "getRoot"]);

    // Inlined component parameter.
    let list = &ir.operations[0];
    assert_eq!(list.params_in(IrParameterLocation::Header).count(), 1);

    // Only the 2xx response counts as success when one is declared.
    let create = &ir.operations[1];
    assert_eq!(create.method, HttpMethod::Post);
    assert!(create.request_body.as_ref().unwrap().required);
    assert!(create.success_types().is_empty());
    let default = create
        .responses
        .iter()
        .find(|r| r.status == "default")
        .unwrap();
    assert_eq!(
        default.content_type.as_deref(),
        Some("application/problem+json")
    );

    // Colon parameters are recognised and synthesized.
    let show = &ir.operations[2];
    assert_eq!(show.key_path(), "/pets/:petId");
    assert_eq!(show.template.to_brace_form(), "/pets/{petId}");
    assert_eq!(show.params_in(IrParameterLocation::Path).count(), 1);

    // `default` stands in when there is no 2xx response.
    let root = &ir.operations[3];
    assert_eq!(root.success_types().len(), 1);
    assert_eq!(root.key_path(), "/");
}

#[test]
fn transform_petstore_all_of_keeps_refs() {
    let spec = parse::from_json(PETSTORE).unwrap();
    let ir = transform::transform(&spec).unwrap();
    let pet = ir
        .schemas
        .iter()
        .find(|s| s.name().pascal_case == "Pet")
        .unwrap();
    match pet {
        IrSchema::Alias(alias) => {
            assert_eq!(alias.target.referenced_names(), vec!["NewPet"]);
        }
        other => panic!("expected alias, got {other:?}"),
    }
}

#[test]
fn transform_rejects_colliding_routes() {
    let spec = parse::from_yaml(COLLIDING).unwrap();
    let err = transform::transform(&spec).unwrap_err();
    match err {
        TransformError::Collision {
            identifier,
            first,
            second,
        } => {
            assert_eq!(identifier, "getAB");
            assert_eq!(first, "GET /a-b");
            assert_eq!(second, "GET /a/b");
        }
        other => panic!("expected collision, got {other:?}"),
    }
}

#[test]
fn transform_alias_applies_to_every_matching_route() {
    let spec = parse::from_yaml(COLLIDING).unwrap();
    let mut options = transform::TransformOptions::default();
    options
        .aliases
        .insert("getAB".to_string(), "getNestedAB".to_string());
    // Aliases apply to every route deriving the name, so both still collide.
    assert!(transform::transform_with_options(&spec, &options).is_err());
}
