use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodegenError {
    #[error("invalid cardinality on field of class {class}")]
    InvalidCardinality { class: String },

    #[error("no read/write function provided for type {type_name}")]
    UnresolvedFieldType { type_name: String },

    #[error("class {class} refers to unknown base {base}")]
    UnknownBase { class: String, base: String },

    #[error("writing generated file {path} failed: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
