use std::path::{Path, PathBuf};

/// Everything that can stop an icon run.
#[derive(Debug, thiserror::Error)]
pub enum IconError {
    /// The source image is not on disk; raised before any image work starts.
    #[error("source image {} does not exist", .0.display())]
    MissingSource(PathBuf),

    #[error("failed to {action} {}", .path.display())]
    Processing {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: ProcessingCause,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ProcessingCause {
    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl IconError {
    pub fn processing(
        action: &'static str,
        path: &Path,
        source: impl Into<ProcessingCause>,
    ) -> Self {
        Self::Processing {
            action,
            path: path.to_path_buf(),
            source: source.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_missing_source_message() {
        let err = IconError::MissingSource(PathBuf::from("icons/icon.png"));
        assert_eq!(err.to_string(), "source image icons/icon.png does not exist");
        assert!(err.source().is_none());
    }

    #[test]
    fn test_processing_keeps_cause() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err = IconError::processing("write", Path::new("icons/icon16.png"), io);

        assert_eq!(err.to_string(), "failed to write icons/icon16.png");
        let cause = err.source().expect("cause should be attached");
        assert_eq!(cause.to_string(), "read-only");
    }
}
