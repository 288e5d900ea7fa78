//! Icon sizes and raster images.
//!
//! This module provides the fixed catalog of square pixel dimensions an
//! icon set is rendered at, and the pixel buffer produced for each of them.

use std::fmt;

use image::RgbaImage;

// ============================================================================
// IconSize
// ============================================================================

/// A square icon dimension in pixels.
///
/// The same number is used for both width and height, and it determines
/// the file name of the rendered output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IconSize(u32);

impl IconSize {
    /// Creates a size from a pixel count, or `None` if it is zero.
    pub const fn new(px: u32) -> Option<Self> {
        if px == 0 { None } else { Some(Self(px)) }
    }

    /// Returns the edge length in pixels.
    pub const fn px(self) -> u32 {
        self.0
    }

    /// Returns the `{n}x{n}` form used in file names and the manifest.
    pub fn dimensions(self) -> String {
        format!("{0}x{0}", self.0)
    }
}

impl fmt::Display for IconSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{0}x{0}", self.0)
    }
}

// ============================================================================
// SizeCatalog
// ============================================================================

/// An ordered, duplicate-free list of sizes to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeCatalog(&'static [IconSize]);

impl SizeCatalog {
    /// The iOS app icon catalog, App Store artwork first.
    pub const IOS: Self = Self(&[
        IconSize(1024), // App Store
        IconSize(180),  // iPhone @3x
        IconSize(120),  // iPhone @2x
        IconSize(167),  // iPad Pro
        IconSize(152),  // iPad, iPad mini
        IconSize(87),   // Settings @3x
        IconSize(80),   // Spotlight @2x
        IconSize(76),   // iPad @1x
        IconSize(60),   // Notification @3x
        IconSize(58),   // Settings @2x
        IconSize(40),   // Spotlight
        IconSize(29),   // Settings
        IconSize(20),   // Notification
    ]);

    /// Returns the sizes in catalog order.
    pub fn sizes(&self) -> &'static [IconSize] {
        self.0
    }

    /// Returns the number of sizes in the catalog.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the catalog has no sizes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the size at `index` in catalog order.
    pub fn get(&self, index: usize) -> Option<IconSize> {
        self.0.get(index).copied()
    }

    /// Returns the largest size, which is the one the manifest points at.
    pub fn largest(&self) -> Option<IconSize> {
        self.0.iter().copied().max()
    }

    /// Returns an iterator over the sizes in catalog order.
    pub fn iter(self) -> impl Iterator<Item = IconSize> {
        self.0.iter().copied()
    }
}

impl Default for SizeCatalog {
    fn default() -> Self {
        Self::IOS
    }
}

impl IntoIterator for SizeCatalog {
    type Item = IconSize;
    type IntoIter = std::iter::Copied<std::slice::Iter<'static, IconSize>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter().copied()
    }
}

// ============================================================================
// RasterImage
// ============================================================================

/// A rendered square pixel buffer for a single [`IconSize`].
///
/// Rasterizers hand these straight to a persister; they are not kept
/// around once written.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterImage {
    size: IconSize,
    data: RgbaImage,
}

impl RasterImage {
    /// Wraps pixel data rendered for `size`.
    ///
    /// Returns `None` unless the buffer is exactly `size` pixels on each side.
    pub fn new(size: IconSize, data: RgbaImage) -> Option<Self> {
        (data.width() == size.px() && data.height() == size.px()).then_some(Self { size, data })
    }

    /// Returns the size this image was rendered for.
    pub fn size(&self) -> IconSize {
        self.size
    }

    /// Returns the width in pixels.
    pub fn width(&self) -> u32 {
        self.data.width()
    }

    /// Returns the height in pixels.
    pub fn height(&self) -> u32 {
        self.data.height()
    }

    /// The pixel data in straight (non-premultiplied) RGBA.
    pub fn data(&self) -> &RgbaImage {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_size_is_rejected() {
        assert!(IconSize::new(0).is_none());
        assert_eq!(IconSize::new(20).map(IconSize::px), Some(20));
    }

    #[test]
    fn size_formats_as_square_dimensions() {
        let size = IconSize::new(167).unwrap();
        assert_eq!(size.to_string(), "167x167");
        assert_eq!(size.dimensions(), "167x167");
    }

    #[test]
    fn ios_catalog_contents() {
        let px: Vec<u32> = SizeCatalog::IOS.iter().map(IconSize::px).collect();
        assert_eq!(
            px,
            [1024, 180, 120, 167, 152, 87, 80, 76, 60, 58, 40, 29, 20]
        );
        assert_eq!(SizeCatalog::IOS.len(), 13);
        assert!(!SizeCatalog::IOS.is_empty());
        assert_eq!(SizeCatalog::IOS.sizes().len(), 13);
        assert_eq!(SizeCatalog::IOS.get(3).map(IconSize::px), Some(167));
        assert_eq!(SizeCatalog::IOS.get(13), None);
        assert_eq!(SizeCatalog::IOS.largest().map(IconSize::px), Some(1024));
        assert_eq!(SizeCatalog::default(), SizeCatalog::IOS);
    }

    #[test]
    fn ios_catalog_has_no_duplicates() {
        let mut px: Vec<u32> = SizeCatalog::IOS.iter().map(IconSize::px).collect();
        px.sort_unstable();
        px.dedup();
        assert_eq!(px.len(), SizeCatalog::IOS.len());
    }

    #[test]
    fn raster_image_must_match_size() {
        let size = IconSize::new(16).unwrap();
        assert!(RasterImage::new(size, RgbaImage::new(16, 16)).is_some());
        assert!(RasterImage::new(size, RgbaImage::new(16, 8)).is_none());

        let image = RasterImage::new(size, RgbaImage::new(16, 16)).unwrap();
        assert_eq!(image.width(), 16);
        assert_eq!(image.height(), 16);
        assert_eq!(image.size(), size);
    }
}
