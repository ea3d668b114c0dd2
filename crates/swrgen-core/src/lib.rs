pub mod config;
pub mod error;
pub mod ir;
pub mod parse;
pub mod transform;

pub use config::GeneratorConfig;
pub use error::GeneratorError;

/// A generated file with path and content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: String,
    pub content: String,
}

/// Trait for code generators that produce files from an IR spec.
pub trait CodeGenerator {
    fn id(&self) -> config::TargetKind;

    fn generate(
        &self,
        ir: &ir::IrSpec,
        config: &GeneratorConfig,
    ) -> Result<Vec<GeneratedFile>, GeneratorError>;
}
