//! The `Contents.json` descriptor of an app icon set.
//!
//! Xcode's asset catalog reads this file to find the icon images. Only the
//! single App Store sized image is listed; Xcode derives the other sizes
//! from it.
//!
//! ```json
//! {
//!   "images": [
//!     {
//!       "filename": "AppIcon-1024x1024.png",
//!       "idiom": "universal",
//!       "platform": "ios",
//!       "size": "1024x1024",
//!       "scale": "1x"
//!     }
//!   ],
//!   "info": {
//!     "author": "xcode",
//!     "version": 1
//!   }
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::icon::{IconSize, SizeCatalog};
use crate::persist::icon_filename;

/// File name of the manifest inside the output directory.
pub const MANIFEST_FILENAME: &str = "Contents.json";

/// Author tag recorded in the manifest metadata.
pub const MANIFEST_AUTHOR: &str = "xcode";

/// Schema version recorded in the manifest metadata.
pub const MANIFEST_VERSION: u32 = 1;

/// One image entry in the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct ImageDescriptor {
    /// Image file name, relative to the icon set directory.
    pub filename: String,
    /// Device family, e.g. `universal`.
    pub idiom: String,
    /// Target platform, e.g. `ios`.
    pub platform: String,
    /// Point size as `{w}x{h}`.
    pub size: String,
    /// Display scale, e.g. `1x`.
    pub scale: String,
}

impl ImageDescriptor {
    /// The universal iOS descriptor for an icon of `size` at 1x.
    pub fn universal_ios(size: IconSize) -> Self {
        Self {
            filename: icon_filename(size),
            idiom: "universal".to_string(),
            platform: "ios".to_string(),
            size: size.dimensions(),
            scale: "1x".to_string(),
        }
    }
}

/// Manifest metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct ManifestInfo {
    /// Tool that produced the manifest.
    pub author: String,
    /// Asset catalog format version.
    pub version: u32,
}

impl Default for ManifestInfo {
    fn default() -> Self {
        Self {
            author: MANIFEST_AUTHOR.to_string(),
            version: MANIFEST_VERSION,
        }
    }
}

/// The whole `Contents.json` document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct Manifest {
    /// Image entries; the icon set lists a single primary image.
    pub images: Vec<ImageDescriptor>,
    /// Authoring metadata.
    pub info: ManifestInfo,
}

impl Manifest {
    /// Builds the manifest for `catalog`, pointing at its largest size.
    ///
    /// The descriptor is produced whether or not that image was actually
    /// rendered.
    pub fn for_catalog(catalog: SizeCatalog) -> Self {
        Self {
            images: catalog
                .largest()
                .map(ImageDescriptor::universal_ios)
                .into_iter()
                .collect(),
            info: ManifestInfo::default(),
        }
    }

    /// Returns the descriptor of the primary (first) image.
    pub fn primary(&self) -> Option<&ImageDescriptor> {
        self.images.first()
    }

    /// Serializes the manifest to a JSON string.
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the manifest to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes a manifest from a JSON string.
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Writes the manifest as `Contents.json` into `output_dir`.
    ///
    /// Returns the path that was written.
    pub fn write_to(&self, output_dir: impl AsRef<Path>) -> Result<PathBuf> {
        let path = output_dir.as_ref().join(MANIFEST_FILENAME);
        let json = self
            .to_json_pretty()
            .map_err(|e| Error::persistence(&path, e))?;
        std::fs::write(&path, json).map_err(|e| Error::persistence(&path, e))?;
        Ok(path)
    }
}

impl Default for Manifest {
    fn default() -> Self {
        Self::for_catalog(SizeCatalog::IOS)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const EXPECTED: &str = r#"{
  "images": [
    {
      "filename": "AppIcon-1024x1024.png",
      "idiom": "universal",
      "platform": "ios",
      "size": "1024x1024",
      "scale": "1x"
    }
  ],
  "info": {
    "author": "xcode",
    "version": 1
  }
}"#;

    #[test]
    fn ios_manifest_points_at_largest_icon() {
        let manifest = Manifest::for_catalog(SizeCatalog::IOS);
        assert_eq!(manifest.images.len(), 1);

        let primary = manifest.primary().unwrap();
        assert_eq!(primary.filename, "AppIcon-1024x1024.png");
        assert_eq!(primary.idiom, "universal");
        assert_eq!(primary.platform, "ios");
        assert_eq!(primary.size, "1024x1024");
        assert_eq!(primary.scale, "1x");
        assert_eq!(manifest.info, ManifestInfo::default());
    }

    #[test]
    fn pretty_json_matches_asset_catalog_layout() {
        assert_eq!(Manifest::default().to_json_pretty().unwrap(), EXPECTED);
    }

    #[test]
    fn compact_json_keeps_field_order() {
        assert_eq!(
            Manifest::default().to_json().unwrap(),
            r#"{"images":[{"filename":"AppIcon-1024x1024.png","idiom":"universal","platform":"ios","size":"1024x1024","scale":"1x"}],"info":{"author":"xcode","version":1}}"#
        );
    }

    #[test]
    fn parses_asset_catalog_json() {
        let manifest = Manifest::from_json(EXPECTED).unwrap();
        assert_eq!(manifest, Manifest::default());
        assert_eq!(manifest.info.author, "xcode");
        assert_eq!(manifest.info.version, 1);
    }

    #[test]
    fn write_to_creates_contents_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = Manifest::default().write_to(dir.path()).unwrap();

        assert_eq!(path, dir.path().join("Contents.json"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), EXPECTED);
    }

    #[test]
    fn write_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let error = Manifest::default()
            .write_to(dir.path().join("absent"))
            .unwrap_err();
        assert!(matches!(error, Error::Persistence { .. }));
    }
}
