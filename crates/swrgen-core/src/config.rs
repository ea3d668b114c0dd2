use std::fmt;
use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::ConfigError;

/// Top-level project configuration loaded from `.swrgen.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SwrgenConfig {
    pub input: String,
    pub output: String,
    pub target: TargetKind,
    pub naming: NamingConfig,
    pub output_options: OutputOptions,
    pub client: ClientConfig,
}

impl Default for SwrgenConfig {
    fn default() -> Self {
        Self {
            input: "openapi.yaml".to_string(),
            output: "src/api".to_string(),
            target: TargetKind::Swr,
            naming: NamingConfig::default(),
            output_options: OutputOptions::default(),
            client: ClientConfig::default(),
        }
    }
}

impl SwrgenConfig {
    /// The subset of settings the generators read.
    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            base_url: self.client.base_url.clone(),
            no_jsdoc: self.client.no_jsdoc,
            index: self.output_options.index,
        }
    }
}

/// Which generator to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    /// Client binding and request wrappers only.
    Fetch,
    /// Everything in `Fetch` plus SWR query/mutation hooks.
    Swr,
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetKind::Fetch => write!(f, "fetch"),
            TargetKind::Swr => write!(f, "swr"),
        }
    }
}

/// Identifier overrides.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    /// Map from route-derived function name to custom alias.
    pub aliases: IndexMap<String, String>,
}

/// Output structure options.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputOptions {
    /// Generate an `index.ts` barrel.
    pub index: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self { index: true }
    }
}

/// Client generation options.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    pub no_jsdoc: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "/".to_string(),
            no_jsdoc: false,
        }
    }
}

/// Settings handed to a [`crate::CodeGenerator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub base_url: String,
    pub no_jsdoc: bool,
    pub index: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        SwrgenConfig::default().generator_config()
    }
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".swrgen.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<SwrgenConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let config: SwrgenConfig =
        serde_yaml_ng::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# swrgen configuration
input: openapi.yaml
output: src/api
target: swr            # fetch | swr

naming:
  aliases: {}
    # get20100401AccountsJson: listAccounts

output_options:
  index: true          # generate index.ts barrel exports

client:
  base_url: /
  no_jsdoc: false
"#
}
