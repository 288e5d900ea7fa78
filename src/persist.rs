//! Writing rendered icons to disk.

use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use image::ImageFormat;

use crate::error::{Error, Result};
use crate::icon::{IconSize, RasterImage};

/// Returns the file name an icon of `size` is saved under.
///
/// ```
/// use iconset_renderer::{IconSize, icon_filename};
///
/// let size = IconSize::new(180).unwrap();
/// assert_eq!(icon_filename(size), "AppIcon-180x180.png");
/// ```
pub fn icon_filename(size: IconSize) -> String {
    format!("AppIcon-{size}.png")
}

/// Saves [`RasterImage`]s as PNG files in one output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PngPersister {
    output_dir: PathBuf,
}

impl PngPersister {
    /// Creates a persister writing into `output_dir`.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Returns the directory icons are written to.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Returns the path an icon of `size` is written to.
    pub fn path_for(&self, size: IconSize) -> PathBuf {
        self.output_dir.join(icon_filename(size))
    }

    /// Creates the output directory if it does not exist yet.
    pub fn ensure_output_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.output_dir)
            .map_err(|e| Error::persistence(&self.output_dir, e))
    }

    /// Encodes `image` as PNG and writes it, overwriting any previous file.
    ///
    /// The PNG is encoded into a hidden temporary file next to the target and
    /// renamed into place, so a failed write leaves no partial file behind.
    /// Returns the path that was written.
    pub fn persist(&self, image: &RasterImage) -> Result<PathBuf> {
        self.ensure_output_dir()?;

        let path = self.path_for(image.size());
        let mut staged = tempfile::Builder::new()
            .prefix(".AppIcon-")
            .suffix(".png.tmp")
            .tempfile_in(&self.output_dir)
            .map_err(|e| Error::persistence(&path, e))?;

        let mut writer = BufWriter::new(staged.as_file_mut());
        image
            .data()
            .write_to(&mut writer, ImageFormat::Png)
            .map_err(|e| Error::persistence(&path, e))?;
        writer.flush().map_err(|e| Error::persistence(&path, e))?;
        drop(writer);

        // Dropping `staged` on any error above removes the temporary file
        staged
            .persist(&path)
            .map_err(|e| Error::persistence(&path, e.error))?;

        Ok(path)
    }
}
