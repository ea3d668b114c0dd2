use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported OpenAPI version: {0}")]
    UnsupportedVersion(String),
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("invalid reference format: {0}")]
    InvalidRefFormat(String),

    #[error("reference target not found: {0}")]
    RefTargetNotFound(String),
}

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("resolve error: {0}")]
    Resolve(#[from] ResolveError),

    /// Two routes, schemas or helpers would be emitted under the same name.
    #[error("identifier collision: `{identifier}` is produced by both `{first}` and `{second}`")]
    Collision {
        identifier: String,
        first: String,
        second: String,
    },

    #[error("alias `{alias}` for `{route}` is not a valid identifier")]
    InvalidIdentifier { alias: String, route: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml_ng::Error,
    },
}

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("template error: {0}")]
    Render(#[from] minijinja::Error),

    #[error(transparent)]
    Transform(#[from] TransformError),
}
