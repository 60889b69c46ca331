use thiserror::Error;

pub type BookResult<T> = Result<T, BookError>;

#[derive(Error, Debug)]
pub enum BookError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Sheet error: {0}")]
    Sheet(String),

    #[error("Unresolved reference: {0}")]
    Reference(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Import error: {0}")]
    Import(String),

    #[error("Parse error: {0}")]
    Parse(String),
}
