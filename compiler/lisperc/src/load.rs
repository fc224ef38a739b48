//! Scoped acquisition of source files.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

/// A source file could not be opened.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("cannot find file '{}'", path.display())]
    NotFound { path: PathBuf },
    #[error("permission denied reading '{}'", path.display())]
    PermissionDenied { path: PathBuf },
    #[error("'{}' is a directory", path.display())]
    IsDirectory { path: PathBuf },
    #[error("error reading '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl LoadError {
    fn from_io(path: &Path, source: io::Error) -> Self {
        let path = path.to_path_buf();
        match source.kind() {
            io::ErrorKind::NotFound => Self::NotFound { path },
            io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            _ => Self::Io { path, source },
        }
    }
}

/// Open `path` for buffered reading.
///
/// The file handle is released when the returned reader is dropped.
pub fn open_source(path: &Path) -> Result<BufReader<File>, LoadError> {
    let file = File::open(path).map_err(|e| LoadError::from_io(path, e))?;
    let metadata = file.metadata().map_err(|e| LoadError::from_io(path, e))?;
    if metadata.is_dir() {
        return Err(LoadError::IsDirectory {
            path: path.to_path_buf(),
        });
    }
    tracing::debug!(path = %path.display(), bytes = metadata.len(), "opened source");
    Ok(BufReader::new(file))
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_not_found() {
        let path = Path::new("definitely/not/here.lisper");
        let err = open_source(path).unwrap_err();
        assert!(matches!(err, LoadError::NotFound { .. }));
        assert_eq!(err.to_string(), "cannot find file 'definitely/not/here.lisper'");
    }

    #[test]
    fn directory_is_rejected() {
        let dir = std::env::temp_dir();
        let err = open_source(&dir).unwrap_err();
        assert!(matches!(
            err,
            LoadError::IsDirectory { .. } | LoadError::Io { .. }
        ));
    }

    #[test]
    fn io_error_keeps_source() {
        let err = LoadError::from_io(
            Path::new("a.lisper"),
            io::Error::other("disk on fire"),
        );
        assert_eq!(err.to_string(), "error reading 'a.lisper': disk on fire");
        assert!(std::error::Error::source(&err).is_some());
    }
}
