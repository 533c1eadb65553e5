use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum TablesError {
    #[error("failed to open table file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
