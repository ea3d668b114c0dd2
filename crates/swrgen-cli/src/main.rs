use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use swrgen_core::config::{self, CONFIG_FILE_NAME, SwrgenConfig, TargetKind};
use swrgen_core::ir::{IrSchema, IrSpec, IrType};
use swrgen_core::parse;
use swrgen_core::transform::{self, TransformOptions};
use swrgen_core::{CodeGenerator, GeneratedFile};
use swrgen_fetch_client::FetchClientGenerator;
use swrgen_swr_hooks::SwrHooksGenerator;

#[derive(Parser)]
#[command(
    name = "swrgen",
    about = "Generate a typed client and SWR hooks from an OpenAPI 3.x spec",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate code from an OpenAPI spec
    Generate {
        /// Path to the OpenAPI spec file (YAML or JSON)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// What to generate
        #[arg(long)]
        target: Option<TargetArg>,
    },

    /// Validate an OpenAPI spec, including identifier collisions
    Validate {
        /// Path to the OpenAPI spec file
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Print the route table derived from an OpenAPI spec
    Inspect {
        /// Path to the OpenAPI spec file
        #[arg(short, long)]
        input: PathBuf,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: InspectFormat,
    },

    /// Initialize a new swrgen configuration
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum TargetArg {
    /// Client binding and request wrappers
    Fetch,
    /// Client binding, request wrappers, and SWR hooks
    Swr,
}

impl From<TargetArg> for TargetKind {
    fn from(arg: TargetArg) -> Self {
        match arg {
            TargetArg::Fetch => TargetKind::Fetch,
            TargetArg::Swr => TargetKind::Swr,
        }
    }
}

#[derive(Clone, ValueEnum)]
enum InspectFormat {
    Yaml,
    Json,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            input,
            output,
            target,
        } => cmd_generate(input, output, target),

        Commands::Validate { input } => cmd_validate(input),

        Commands::Inspect { input, format } => cmd_inspect(input, format),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "swrgen", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Load `.swrgen.yaml` from the current directory, falling back to defaults.
fn load_project_config() -> Result<SwrgenConfig> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    let cfg = config::load_config(&config_path)?;
    if cfg.is_some() {
        log::debug!("loaded {}", config_path.display());
    }
    Ok(cfg.unwrap_or_default())
}

fn load_spec(path: &Path, cfg: &SwrgenConfig) -> Result<IrSpec> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;

    let parsed = parse::from_path_str(path, &content)
        .with_context(|| format!("failed to parse {}", path.display()))?;

    let options = TransformOptions {
        aliases: cfg.naming.aliases.clone(),
    };

    let ir = transform::transform_with_options(&parsed, &options)
        .with_context(|| format!("failed to process {}", path.display()))?;
    Ok(ir)
}

fn get_generator(target: TargetKind) -> Box<dyn CodeGenerator> {
    match target {
        TargetKind::Fetch => Box::new(FetchClientGenerator),
        TargetKind::Swr => Box::new(SwrHooksGenerator),
    }
}

/// Write generated files to disk under the given base directory.
fn write_files(base: &Path, files: &[GeneratedFile]) -> Result<()> {
    for file in files {
        let path = base.join(&file.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        fs::write(&path, &file.content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        eprintln!("  wrote {}", path.display());
    }
    Ok(())
}

/// Generate the "do not edit" README.
fn readme_content() -> &'static str {
    r#"# Generated Code. Do Not Edit.

This directory is generated by swrgen from an OpenAPI spec.
Any manual changes will be overwritten the next time `swrgen generate` is run.

To regenerate, run:
```
swrgen generate
```

To rename a generated function, add an alias under `naming.aliases` in `.swrgen.yaml`.
"#
}

fn cmd_generate(
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    target: Option<TargetArg>,
) -> Result<()> {
    let cfg = load_project_config()?;
    let input = input.unwrap_or_else(|| PathBuf::from(&cfg.input));
    let output_dir = output.unwrap_or_else(|| PathBuf::from(&cfg.output));
    let target = target.map(TargetKind::from).unwrap_or(cfg.target);

    let ir = load_spec(&input, &cfg)?;

    eprintln!("Generating {} → {}", target, output_dir.display());
    let files = get_generator(target).generate(&ir, &cfg.generator_config())?;

    fs::create_dir_all(&output_dir).with_context(|| {
        format!("failed to create output directory {}", output_dir.display())
    })?;

    write_files(&output_dir, &files)?;

    let readme_path = output_dir.join("README.md");
    fs::write(&readme_path, readme_content())
        .with_context(|| format!("failed to write {}", readme_path.display()))?;
    eprintln!("  wrote {}", readme_path.display());

    eprintln!(
        "Generated {} files for {} routes in {}",
        files.len() + 1, // +1 for README
        ir.operations.len(),
        output_dir.display()
    );
    Ok(())
}

fn cmd_validate(input: PathBuf) -> Result<()> {
    let cfg = load_project_config()?;
    let ir = load_spec(&input, &cfg)?;

    eprintln!("Valid OpenAPI spec: {}", ir.info.title);
    eprintln!("  Version: {}", ir.info.version);
    eprintln!("  Schemas: {}", ir.schemas.len());
    eprintln!("  Routes: {}", ir.operations.len());
    eprintln!("  Query hooks: {}", ir.queries().count());
    eprintln!("  Mutation hooks: {}", ir.mutations().count());

    eprintln!("Validation successful.");
    Ok(())
}

fn cmd_inspect(input: PathBuf, format: InspectFormat) -> Result<()> {
    let cfg = load_project_config()?;
    let ir = load_spec(&input, &cfg)?;

    let summary = build_inspect_summary(&ir);

    match format {
        InspectFormat::Yaml => {
            let yaml = serde_yaml_ng::to_string(&summary)?;
            print!("{}", yaml);
        }
        InspectFormat::Json => {
            let json = serde_json::to_string_pretty(&summary)?;
            println!("{}", json);
        }
    }

    Ok(())
}

fn build_inspect_summary(ir: &IrSpec) -> serde_json::Value {
    let schemas: Vec<serde_json::Value> = ir
        .schemas
        .iter()
        .map(|s| {
            serde_json::json!({
                "name": s.name().pascal_case,
                "kind": match s {
                    IrSchema::Object(_) => "object",
                    IrSchema::Enum(_) => "enum",
                    IrSchema::Alias(_) => "alias",
                    IrSchema::Union(_) => "union",
                },
                "references": schema_references(s),
            })
        })
        .collect();

    let routes: Vec<serde_json::Value> = ir
        .operations
        .iter()
        .map(|op| {
            let mut route = serde_json::json!({
                "function": op.name.function,
                "method": op.method.as_str(),
                "path": op.path,
                "hook": op.name.hook(),
                "args_type": op.name.args_type(),
                "response_type": op.name.response_type(),
                "deprecated": op.deprecated,
                "nullable_response": op.success_types().iter().any(IrType::is_nullable),
                "tags": op.tags,
            });
            if op.is_query() {
                route["kind"] = "query".into();
                route["key_function"] = op.name.key_function().into();
                route["key"] = format!("['GET', '{}', args]", op.key_path()).into();
            } else {
                route["kind"] = "mutation".into();
                route["key"] = op.mutation_key().into();
            }
            route
        })
        .collect();

    serde_json::json!({
        "info": {
            "title": ir.info.title,
            "version": ir.info.version,
        },
        "servers": ir.servers.iter().map(|s| s.url.as_str()).collect::<Vec<_>>(),
        "schemas": schemas,
        "routes": routes,
    })
}

/// Component schemas a schema points at, deduplicated in order of appearance.
fn schema_references(schema: &IrSchema) -> Vec<String> {
    let types: Vec<&IrType> = match schema {
        IrSchema::Object(o) => o
            .fields
            .iter()
            .map(|f| &f.field_type)
            .chain(o.additional_properties.as_ref())
            .collect(),
        IrSchema::Enum(_) => Vec::new(),
        IrSchema::Alias(a) => vec![&a.target],
        IrSchema::Union(u) => u.variants.iter().collect(),
    };
    let mut names: Vec<String> = Vec::new();
    for name in types.iter().flat_map(|t| t.referenced_names()) {
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())
        .with_context(|| format!("failed to write {}", config_path.display()))?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}
