use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to create output directory {path:?}: {source}")]
    CreateOutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read schema {path:?}: {source}")]
    ReadSchema {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write generated file {path:?}: {source}")]
    WriteGeneratedFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Tables(#[from] cpacsgen_tables::TablesError),

    #[error(transparent)]
    Schema(#[from] cpacsgen_schema::SchemaError),

    #[error(transparent)]
    TypeSystem(#[from] cpacsgen_typesystem::ModelError),

    #[error(transparent)]
    Codegen(#[from] cpacsgen_codegen::CodegenError),
}
