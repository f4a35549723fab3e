use std::path::PathBuf;
use thiserror::Error;

/// Errors of the file-backed persistence (race file, config file, win counter file). They never
/// leave the crate's best-effort loaders and savers, which log them and fall back to defaults.
#[derive(Error, Debug)]
pub enum PersistError {
    /// The file does not exist (not an error for the player, defaults apply)
    #[error("File {0} does not exist")]
    Missing(PathBuf),

    /// Reading or writing failed
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The content could not be interpreted
    #[error("Could not parse {path}: {reason}")]
    Parse { path: PathBuf, reason: String },
}

impl PersistError {
    pub(crate) fn from_io(path: &std::path::Path, source: std::io::Error) -> PersistError {
        if source.kind() == std::io::ErrorKind::NotFound {
            PersistError::Missing(path.to_path_buf())
        } else {
            PersistError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

pub type PersistResult<T> = Result<T, PersistError>;
