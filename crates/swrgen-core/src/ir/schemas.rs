use super::types::NormalizedName;

/// A named component schema, emitted as one top-level declaration in `schema.ts`.
#[derive(Debug, Clone)]
pub enum IrSchema {
    /// `export interface Name { ... }`
    Object(IrObjectSchema),
    /// `export type Name = 'a' | 'b';`
    Enum(IrEnumSchema),
    /// `export type Name = <type>;`
    Alias(IrAliasSchema),
    /// `export type Name = A | B;` from `oneOf` / `anyOf`.
    Union(IrUnionSchema),
}

impl IrSchema {
    pub fn name(&self) -> &NormalizedName {
        match self {
            IrSchema::Object(o) => &o.name,
            IrSchema::Enum(e) => &e.name,
            IrSchema::Alias(a) => &a.name,
            IrSchema::Union(u) => &u.name,
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            IrSchema::Object(o) => o.description.as_deref(),
            IrSchema::Enum(e) => e.description.as_deref(),
            IrSchema::Alias(a) => a.description.as_deref(),
            IrSchema::Union(u) => u.description.as_deref(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct IrObjectSchema {
    pub name: NormalizedName,
    pub description: Option<String>,
    pub fields: Vec<IrField>,
    /// Type of undeclared keys, rendered as an index signature.
    pub additional_properties: Option<IrType>,
}

/// A property of an object schema. `original_name` is the wire key and is what the
/// generated interface uses.
#[derive(Debug, Clone)]
pub struct IrField {
    pub original_name: String,
    pub field_type: IrType,
    pub required: bool,
    pub description: Option<String>,
    pub read_only: bool,
    pub write_only: bool,
}

#[derive(Debug, Clone)]
pub struct IrEnumSchema {
    pub name: NormalizedName,
    pub description: Option<String>,
    pub variants: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct IrAliasSchema {
    pub name: NormalizedName,
    pub description: Option<String>,
    pub target: IrType,
}

#[derive(Debug, Clone)]
pub struct IrUnionSchema {
    pub name: NormalizedName,
    pub description: Option<String>,
    pub variants: Vec<IrType>,
    pub discriminator: Option<IrDiscriminator>,
}

/// `discriminator` with its mapping targets already converted to schema names.
#[derive(Debug, Clone)]
pub struct IrDiscriminator {
    pub property_name: String,
    pub mapping: Vec<(String, String)>,
}

/// An inline type. Named component schemas are referenced by `Ref`, never inlined.
#[derive(Debug, Clone, PartialEq)]
pub enum IrType {
    String,
    StringLiteral(String),
    Number,
    Integer,
    Boolean,
    Null,
    Array(Box<IrType>),
    /// Inline object: `(wire name, type, required)`.
    Object(Vec<(String, IrType, bool)>),
    /// `Record<string, T>`
    Map(Box<IrType>),
    /// PascalCase name of a component schema.
    Ref(String),
    Union(Vec<IrType>),
    /// `allOf` that keeps named refs.
    Intersection(Vec<IrType>),
    Any,
    /// No payload, e.g. a `204` response.
    Void,
    DateTime,
    Binary,
}

impl IrType {
    /// Whether the type admits `null`.
    pub fn is_nullable(&self) -> bool {
        match self {
            IrType::Null | IrType::Any => true,
            IrType::Union(variants) => variants.iter().any(IrType::is_nullable),
            _ => false,
        }
    }

    /// Names of every component schema this type points at, in order of appearance.
    pub fn referenced_names(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_refs(&mut out);
        out
    }

    fn collect_refs<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            IrType::Ref(name) => {
                if !out.contains(&name.as_str()) {
                    out.push(name);
                }
            }
            IrType::Array(inner) | IrType::Map(inner) => inner.collect_refs(out),
            IrType::Object(fields) => {
                for (_, t, _) in fields {
                    t.collect_refs(out);
                }
            }
            IrType::Union(types) | IrType::Intersection(types) => {
                for t in types {
                    t.collect_refs(out);
                }
            }
            _ => {}
        }
    }
}
