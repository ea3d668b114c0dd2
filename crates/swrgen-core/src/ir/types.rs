use std::fmt;

/// A fully resolved, generator-ready intermediate representation of an OpenAPI spec.
#[derive(Debug, Clone)]
pub struct IrSpec {
    pub info: IrInfo,
    pub servers: Vec<IrServer>,
    pub schemas: Vec<IrSchema>,
    pub operations: Vec<IrOperation>,
}

impl IrSpec {
    /// GET routes, which receive a query hook and cache-key function.
    pub fn queries(&self) -> impl Iterator<Item = &IrOperation> {
        self.operations.iter().filter(|op| op.is_query())
    }

    /// Non-GET routes, which receive a mutation hook.
    pub fn mutations(&self) -> impl Iterator<Item = &IrOperation> {
        self.operations.iter().filter(|op| !op.is_query())
    }
}

/// API metadata.
#[derive(Debug, Clone)]
pub struct IrInfo {
    pub title: String,
    pub description: Option<String>,
    pub version: String,
}

/// A server URL.
#[derive(Debug, Clone)]
pub struct IrServer {
    pub url: String,
    pub description: Option<String>,
}

/// A component name as written in the document and as emitted in TypeScript.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedName {
    pub original: String,
    pub pascal_case: String,
}

impl fmt::Display for NormalizedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.original)
    }
}

// Re-export schema and operation types for convenience
pub use super::operations::*;
pub use super::schemas::*;
