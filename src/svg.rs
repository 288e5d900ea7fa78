//! SVG rasterization using resvg/usvg.
//!
//! [`SvgRasterizer`] renders a [`VectorSource`] into a square
//! [`RasterImage`] for one [`IconSize`] at a time. Each call re-reads and
//! re-parses the source, so nothing is cached between sizes.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::{Rgba, RgbaImage};
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{self, Options, Tree, fontdb};

use crate::error::{Error, Result};
use crate::icon::{IconSize, RasterImage};

// ============================================================================
// VectorSource
// ============================================================================

/// A path to the master SVG artwork.
///
/// The file is only ever read, never copied or modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VectorSource {
    path: PathBuf,
}

impl VectorSource {
    /// Creates a source referring to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the artwork path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns `true` if the path resolves to an existing file.
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Directory that relative `href`s inside the SVG resolve against.
    fn resources_dir(&self) -> Option<PathBuf> {
        self.path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map(Path::to_path_buf)
    }
}

// ============================================================================
// Rasterize
// ============================================================================

/// Converts a vector source into a square pixel buffer.
///
/// Implementations must return an image exactly `size` pixels on each side
/// or an [`Error::Conversion`] naming the requested size.
pub trait Rasterize {
    /// Renders `source` into a `size x size` image.
    fn rasterize(&self, source: &VectorSource, size: IconSize) -> Result<RasterImage>;
}

// ============================================================================
// SvgRasterizer
// ============================================================================

/// The resvg-backed [`Rasterize`] implementation.
///
/// The document is scaled uniformly to fit the square and centered, so
/// non-square artwork keeps its aspect ratio and gets transparent bars.
#[derive(Clone, Default)]
pub struct SvgRasterizer {
    fontdb: Option<Arc<fontdb::Database>>,
}

impl fmt::Debug for SvgRasterizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SvgRasterizer")
            .field("font_faces", &self.fontdb.as_ref().map(|db| db.len()))
            .finish()
    }
}

impl SvgRasterizer {
    /// Creates a rasterizer without any fonts loaded.
    ///
    /// `<text>` elements are skipped by this rasterizer; use
    /// [`with_system_fonts`](Self::with_system_fonts) when the artwork has text.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a rasterizer that resolves text against the system fonts.
    pub fn with_system_fonts() -> Self {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        log::debug!("Loaded {} system font faces", db.len());
        Self {
            fontdb: Some(Arc::new(db)),
        }
    }

    fn options(&self, source: &VectorSource) -> Options<'static> {
        let mut opts = Options {
            resources_dir: source.resources_dir(),
            ..Options::default()
        };
        if let Some(db) = &self.fontdb {
            opts.fontdb = Arc::clone(db);
        }
        opts
    }
}

impl Rasterize for SvgRasterizer {
    fn rasterize(&self, source: &VectorSource, size: IconSize) -> Result<RasterImage> {
        let svg_data = std::fs::read(source.path()).map_err(|e| {
            Error::conversion(size, format!("reading {}: {e}", source.path().display()))
        })?;
        let tree = Tree::from_data(&svg_data, &self.options(source))
            .map_err(|e| Error::conversion(size, format!("parsing SVG: {e}")))?;
        render_tree(&tree, size)
    }
}

/// Renders a parsed tree into a `size x size` image.
pub fn render_tree(tree: &Tree, size: IconSize) -> Result<RasterImage> {
    let px = size.px();
    let svg_size = tree.size();
    let scale = (px as f32 / svg_size.width()).min(px as f32 / svg_size.height());
    let offset_x = (px as f32 - svg_size.width() * scale) / 2.0;
    let offset_y = (px as f32 - svg_size.height() * scale) / 2.0;
    let transform = Transform::from_scale(scale, scale).post_translate(offset_x, offset_y);

    let mut pixmap = Pixmap::new(px, px)
        .ok_or_else(|| Error::conversion(size, format!("cannot allocate a {size} pixmap")))?;
    resvg::render(tree, transform, &mut pixmap.as_mut());

    RasterImage::new(size, pixmap_to_rgba_image(&pixmap))
        .ok_or_else(|| Error::conversion(size, "rendered pixmap is not square"))
}

/// Parses SVG markup held in memory.
///
/// Handy for artwork that is generated rather than loaded from disk.
pub fn parse_svg(svg_data: &str) -> std::result::Result<Tree, usvg::Error> {
    Tree::from_str(svg_data, &Options::default())
}

/// Converts a tiny_skia Pixmap to an image::RgbaImage.
fn pixmap_to_rgba_image(pixmap: &Pixmap) -> RgbaImage {
    let mut img = RgbaImage::new(pixmap.width(), pixmap.height());

    // tiny_skia stores premultiplied alpha, image expects straight alpha
    for (dst, src) in img.pixels_mut().zip(pixmap.pixels()) {
        let color = src.demultiply();
        *dst = Rgba([color.red(), color.green(), color.blue(), color.alpha()]);
    }

    img
}

// ============================================================================
// Tests
// ============================================================================
