use swrgen_core::config::{GeneratorConfig, TargetKind};
use swrgen_core::ir::IrSpec;
use swrgen_core::{CodeGenerator, GeneratedFile, GeneratorError};
use swrgen_fetch_client::FetchClientGenerator;
use swrgen_fetch_client::emitters::index::emit_index;
use swrgen_fetch_client::generator::file;

use crate::emitters;

/// SWR generator. Produces the fetch client files plus `hooks.ts`.
pub struct SwrHooksGenerator;

impl CodeGenerator for SwrHooksGenerator {
    fn id(&self) -> TargetKind {
        TargetKind::Swr
    }

    fn generate(
        &self,
        ir: &IrSpec,
        config: &GeneratorConfig,
    ) -> Result<Vec<GeneratedFile>, GeneratorError> {
        let mut files = FetchClientGenerator::base_files(ir, config)?;

        files.push(file(
            "hooks.ts",
            emitters::hooks::emit_hooks(ir, config.no_jsdoc)?,
        ));

        if config.index {
            files.push(file(
                "index.ts",
                emit_index(&["schema", "client", "requests", "hooks"])?,
            ));
        }

        log::info!(
            "swr hooks: {} queries, {} mutations, {} files",
            ir.queries().count(),
            ir.mutations().count(),
            files.len()
        );
        Ok(files)
    }
}
