// core/src/error/source_error.rs
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read declaration: {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to walk directory tree under {}: {message}", root.display())]
    Walk { root: PathBuf, message: String },
}
