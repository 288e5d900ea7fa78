//! Error types for the icon set pipeline.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::icon::IconSize;

pub type Result<T> = std::result::Result<T, Error>;

/// Boxed underlying cause of a failed write.
pub type BoxedCause = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum Error {
    /// The vector source does not resolve to an existing file.
    #[error(
        "vector source {} not found; save the master artwork there as `app_icon.svg`",
        path.display()
    )]
    MissingSource { path: PathBuf },

    /// The source could not be read, parsed or rasterized at `size`.
    #[error("could not rasterize {size}: {message}")]
    Conversion { size: IconSize, message: String },

    /// An image, the manifest or the output directory could not be written.
    #[error("could not write {}: {source}", path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: BoxedCause,
    },
}

impl Error {
    pub(crate) fn conversion(size: IconSize, message: impl ToString) -> Self {
        Self::Conversion {
            size,
            message: message.to_string(),
        }
    }

    pub(crate) fn persistence(path: impl AsRef<Path>, source: impl Into<BoxedCause>) -> Self {
        Self::Persistence {
            path: path.as_ref().to_path_buf(),
            source: source.into(),
        }
    }

    /// The icon size this error is tied to, if any.
    pub fn size(&self) -> Option<IconSize> {
        match self {
            Self::Conversion { size, .. } => Some(*size),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversion_message_names_size_and_cause() {
        let size = IconSize::new(180).unwrap();
        let error = Error::conversion(size, "bad markup");
        assert_eq!(error.to_string(), "could not rasterize 180x180: bad markup");
        assert_eq!(error.size(), Some(size));
    }

    #[test]
    fn persistence_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let error = Error::persistence("out/Contents.json", io);
        assert!(error.to_string().contains("Contents.json"));
        assert!(std::error::Error::source(&error).is_some());
        assert_eq!(error.size(), None);
    }
}
