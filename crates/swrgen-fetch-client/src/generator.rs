use swrgen_core::config::{GeneratorConfig, TargetKind};
use swrgen_core::ir::IrSpec;
use swrgen_core::{CodeGenerator, GeneratedFile, GeneratorError};

use crate::emitters;

/// Client binding and request wrapper generator.
///
/// Emits `schema.ts`, `client.ts`, `requests.ts`, and an `index.ts` barrel unless
/// disabled.
pub struct FetchClientGenerator;

impl FetchClientGenerator {
    /// The files every target shares: types, client binding, and request wrappers.
    pub fn base_files(
        ir: &IrSpec,
        config: &GeneratorConfig,
    ) -> Result<Vec<GeneratedFile>, GeneratorError> {
        Ok(vec![
            file("schema.ts", emitters::schema::emit_schema(ir)?),
            file("client.ts", emitters::client::emit_client(&config.base_url)?),
            file(
                "requests.ts",
                emitters::requests::emit_requests(ir, config.no_jsdoc)?,
            ),
        ])
    }
}

/// Wrap rendered content as a `GeneratedFile`.
pub fn file(path: &str, content: String) -> GeneratedFile {
    log::debug!("rendered {path} ({} bytes)", content.len());
    GeneratedFile {
        path: path.to_string(),
        content,
    }
}

impl CodeGenerator for FetchClientGenerator {
    fn id(&self) -> TargetKind {
        TargetKind::Fetch
    }

    fn generate(
        &self,
        ir: &IrSpec,
        config: &GeneratorConfig,
    ) -> Result<Vec<GeneratedFile>, GeneratorError> {
        let mut files = Self::base_files(ir, config)?;

        if config.index {
            files.push(file(
                "index.ts",
                emitters::index::emit_index(&["schema", "client", "requests"])?,
            ));
        }

        log::info!(
            "fetch client: {} routes, {} files",
            ir.operations.len(),
            files.len()
        );
        Ok(files)
    }
}
