use indexmap::IndexMap;

use crate::ir::{
    IrAliasSchema, IrDiscriminator, IrEnumSchema, IrField, IrObjectSchema, IrSchema, IrType,
    IrUnionSchema,
};
use crate::parse::schema::{AdditionalProperties, Schema, SchemaOrRef, SchemaType, TypeSet};

use super::name_normalizer::normalize_name;

/// Name a component reference resolves to, e.g. `#/components/schemas/call-list` → `CallList`.
pub fn ref_type_name(ref_path: &str) -> String {
    let name = ref_path.rsplit('/').next().unwrap_or("Unknown");
    normalize_name(name).pascal_case
}

/// Convert a parsed `SchemaOrRef` to an `IrType`.
pub fn schema_or_ref_to_ir_type(schema_or_ref: &SchemaOrRef) -> IrType {
    match schema_or_ref {
        SchemaOrRef::Ref { ref_path } => IrType::Ref(ref_type_name(ref_path)),
        SchemaOrRef::Schema(schema) => schema_to_ir_type(schema),
    }
}

/// Convert a parsed `Schema` to an `IrType`, honouring 3.0 `nullable`.
pub fn schema_to_ir_type(schema: &Schema) -> IrType {
    let base = non_nullable_type(schema);
    if schema.nullable == Some(true) && !matches!(base, IrType::Null | IrType::Any) {
        return with_null(base);
    }
    base
}

fn with_null(base: IrType) -> IrType {
    match base {
        IrType::Union(mut variants) => {
            if !variants.contains(&IrType::Null) {
                variants.push(IrType::Null);
            }
            IrType::Union(variants)
        }
        other => IrType::Union(vec![other, IrType::Null]),
    }
}

fn non_nullable_type(schema: &Schema) -> IrType {
    if !schema.one_of.is_empty() {
        return IrType::Union(schema.one_of.iter().map(schema_or_ref_to_ir_type).collect());
    }
    if !schema.any_of.is_empty() {
        return IrType::Union(schema.any_of.iter().map(schema_or_ref_to_ir_type).collect());
    }
    if !schema.all_of.is_empty() {
        return all_of_to_ir_type(schema);
    }

    if let Some(literals) = string_literals(&schema.enum_values) {
        return match literals.len() {
            1 => IrType::StringLiteral(literals[0].clone()),
            _ => IrType::Union(literals.into_iter().map(IrType::StringLiteral).collect()),
        };
    }

    if let Some(s) = schema.const_value.as_ref().and_then(|v| v.as_str()) {
        return IrType::StringLiteral(s.to_string());
    }

    match &schema.schema_type {
        Some(TypeSet::Single(t)) => single_type(*t, schema),
        Some(TypeSet::Multiple(types)) => {
            let mut variants: Vec<IrType> = types
                .iter()
                .filter(|t| **t != SchemaType::Null)
                .map(|t| single_type(*t, schema))
                .collect();
            if types.contains(&SchemaType::Null) {
                variants.push(IrType::Null);
            }
            match variants.len() {
                0 => IrType::Any,
                1 => variants.remove(0),
                _ => IrType::Union(variants),
            }
        }
        None if !schema.properties.is_empty() => resolve_object_type(schema),
        None => match &schema.items {
            Some(items) => IrType::Array(Box::new(schema_or_ref_to_ir_type(items))),
            None => IrType::Any,
        },
    }
}

fn single_type(t: SchemaType, schema: &Schema) -> IrType {
    match t {
        SchemaType::String => match schema.format.as_deref() {
            Some("date-time" | "date") => IrType::DateTime,
            Some("binary") => IrType::Binary,
            _ => IrType::String,
        },
        SchemaType::Number => IrType::Number,
        SchemaType::Integer => IrType::Integer,
        SchemaType::Boolean => IrType::Boolean,
        SchemaType::Null => IrType::Null,
        SchemaType::Array => match &schema.items {
            Some(items) => IrType::Array(Box::new(schema_or_ref_to_ir_type(items))),
            None => IrType::Array(Box::new(IrType::Any)),
        },
        SchemaType::Object => resolve_object_type(schema),
    }
}

/// `allOf` with a single member collapses to that member; otherwise refs are kept and
/// inline members become object literals in an intersection.
fn all_of_to_ir_type(schema: &Schema) -> IrType {
    if schema.all_of.len() == 1 && schema.properties.is_empty() {
        return schema_or_ref_to_ir_type(&schema.all_of[0]);
    }
    let mut parts: Vec<IrType> = schema.all_of.iter().map(schema_or_ref_to_ir_type).collect();
    if !schema.properties.is_empty() {
        parts.push(inline_object(&schema.properties, &schema.required));
    }
    IrType::Intersection(parts)
}

fn resolve_object_type(schema: &Schema) -> IrType {
    if !schema.properties.is_empty() {
        return inline_object(&schema.properties, &schema.required);
    }
    match &schema.additional_properties {
        Some(AdditionalProperties::Schema(s)) => IrType::Map(Box::new(schema_or_ref_to_ir_type(s))),
        Some(AdditionalProperties::Bool(true)) | None => IrType::Map(Box::new(IrType::Any)),
        Some(AdditionalProperties::Bool(false)) => IrType::Object(Vec::new()),
    }
}

fn inline_object(properties: &IndexMap<String, SchemaOrRef>, required: &[String]) -> IrType {
    IrType::Object(
        properties
            .iter()
            .map(|(name, prop)| {
                (
                    name.clone(),
                    schema_or_ref_to_ir_type(prop),
                    required.contains(name),
                )
            })
            .collect(),
    )
}

/// `Some` when every enum value is a string.
fn string_literals(values: &[serde_json::Value]) -> Option<Vec<String>> {
    if values.is_empty() {
        return None;
    }
    values
        .iter()
        .map(|v| v.as_str().map(str::to_string))
        .collect()
}

/// Convert a named component schema to an `IrSchema`.
pub fn schema_or_ref_to_ir_schema(name: &str, schema_or_ref: &SchemaOrRef) -> IrSchema {
    match schema_or_ref {
        SchemaOrRef::Ref { ref_path } => IrSchema::Alias(IrAliasSchema {
            name: normalize_name(name),
            description: None,
            target: IrType::Ref(ref_type_name(ref_path)),
        }),
        SchemaOrRef::Schema(schema) => schema_to_ir_schema(name, schema),
    }
}

/// Convert a named `Schema` to an `IrSchema`.
pub fn schema_to_ir_schema(name: &str, schema: &Schema) -> IrSchema {
    let normalized = normalize_name(name);
    let description = schema.description.clone();

    if let Some(variants) = string_literals(&schema.enum_values) {
        if schema.nullable != Some(true) {
            return IrSchema::Enum(IrEnumSchema {
                name: normalized,
                description,
                variants,
            });
        }
    }

    let variants_src = if !schema.one_of.is_empty() {
        &schema.one_of
    } else {
        &schema.any_of
    };
    if !variants_src.is_empty() {
        let discriminator = schema.discriminator.as_ref().map(|d| IrDiscriminator {
            property_name: d.property_name.clone(),
            mapping: d
                .mapping
                .iter()
                .map(|(k, v)| (k.clone(), ref_type_name(v)))
                .collect(),
        });
        return IrSchema::Union(IrUnionSchema {
            name: normalized,
            description,
            variants: variants_src.iter().map(schema_or_ref_to_ir_type).collect(),
            discriminator,
        });
    }

    // allOf made only of inline members flattens into one interface.
    if !schema.all_of.is_empty()
        && schema
            .all_of
            .iter()
            .all(|s| matches!(s, SchemaOrRef::Schema(_)))
    {
        let mut fields = Vec::new();
        collect_all_of_fields(&schema.all_of, &mut fields);
        fields.extend(build_fields(&schema.properties, &schema.required));
        return IrSchema::Object(IrObjectSchema {
            name: normalized,
            description,
            fields,
            additional_properties: None,
        });
    }

    let is_object = matches!(
        schema.schema_type,
        Some(TypeSet::Single(SchemaType::Object)) | None
    );
    if is_object
        && schema.all_of.is_empty()
        && !schema.properties.is_empty()
        && schema.nullable != Some(true)
    {
        let additional_properties = match &schema.additional_properties {
            Some(AdditionalProperties::Schema(s)) => Some(schema_or_ref_to_ir_type(s)),
            Some(AdditionalProperties::Bool(true)) => Some(IrType::Any),
            _ => None,
        };
        return IrSchema::Object(IrObjectSchema {
            name: normalized,
            description,
            fields: build_fields(&schema.properties, &schema.required),
            additional_properties,
        });
    }

    IrSchema::Alias(IrAliasSchema {
        name: normalized,
        description,
        target: schema_to_ir_type(schema),
    })
}

fn collect_all_of_fields(all_of: &[SchemaOrRef], out: &mut Vec<IrField>) {
    for item in all_of {
        if let SchemaOrRef::Schema(schema) = item {
            collect_all_of_fields(&schema.all_of, out);
            out.extend(build_fields(&schema.properties, &schema.required));
        }
    }
}

fn build_fields(properties: &IndexMap<String, SchemaOrRef>, required: &[String]) -> Vec<IrField> {
    properties
        .iter()
        .map(|(name, prop)| {
            let (description, read_only, write_only) = match prop {
                SchemaOrRef::Schema(s) => (
                    s.description.clone(),
                    s.read_only.unwrap_or(false),
                    s.write_only.unwrap_or(false),
                ),
                SchemaOrRef::Ref { .. } => (None, false, false),
            };
            IrField {
                original_name: name.clone(),
                field_type: schema_or_ref_to_ir_type(prop),
                required: required.contains(name),
                description,
                read_only,
                write_only,
            }
        })
        .collect()
}
