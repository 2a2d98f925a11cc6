use commux_schema::SchemaError;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Errors raised while turning schema documents into client files.
#[derive(Debug)]
pub enum BuildError {
    /// A schema could not be loaded or a service could not be generated.
    Schema { path: PathBuf, source: SchemaError },
    /// Writing or reading a generated file failed.
    Io { path: PathBuf, source: io::Error },
    /// No output directory was configured and `OUT_DIR` is not set.
    MissingOutDir,
    /// Two services would be written to the same file.
    DuplicateOutput { file_name: String },
    /// A generated file on disk differs from what the schemas produce.
    Stale { path: PathBuf },
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::Schema { path, source } => write!(f, "{}: {}", path.display(), source),
            BuildError::Io { path, source } => write!(f, "{}: {}", path.display(), source),
            BuildError::MissingOutDir => {
                write!(f, "no output directory configured and OUT_DIR is not set")
            }
            BuildError::DuplicateOutput { file_name } => {
                write!(f, "more than one service generates '{file_name}'")
            }
            BuildError::Stale { path } => write!(
                f,
                "{} is out of date with its schema; regenerate it",
                path.display()
            ),
        }
    }
}

impl std::error::Error for BuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BuildError::Schema { source, .. } => Some(source),
            BuildError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
