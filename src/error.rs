use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiftError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("schema error: {0}")]
    Schema(String),

    #[error("invalid pattern `{pattern}`: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("schema file {path}: {detail}")]
    SchemaFile { path: String, detail: String },

    #[error("document {name}: {detail}")]
    Extraction { name: String, detail: String },

    #[error("record has {got} values, expected {expected}")]
    RecordWidth { expected: usize, got: usize },

    #[error("no documents found in {path}")]
    EmptyInput { path: String },

    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: csv::Error,
    },
}

pub type Result<T> = std::result::Result<T, SiftError>;
