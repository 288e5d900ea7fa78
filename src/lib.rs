//! iconset-renderer: iOS app icon sets from a single SVG
//!
//! This crate renders one master SVG artwork into every size of the iOS
//! app icon catalog and writes the `Contents.json` manifest Xcode's asset
//! catalog expects next to the PNG files.
//!
//! # Example
//!
//! ```no_run
//! use iconset_renderer::{GeneratorConfig, IconSetGenerator};
//!
//! // Reads `app_icon.svg`, writes into `AppIconSet.appiconset/`
//! let report = IconSetGenerator::new(&GeneratorConfig::default()).run()?;
//!
//! for skipped in report.skipped() {
//!     eprintln!("{} was not generated", skipped.size);
//! }
//! # Ok::<(), iconset_renderer::Error>(())
//! ```
//!
//! # Individual steps
//!
//! The rasterizer, persister and manifest can also be used on their own:
//!
//! ```no_run
//! use iconset_renderer::{
//!     IconSize, Manifest, PngPersister, Rasterize, SizeCatalog, SvgRasterizer, VectorSource,
//! };
//!
//! let source = VectorSource::new("app_icon.svg");
//! let persister = PngPersister::new("out");
//!
//! let image = SvgRasterizer::new().rasterize(&source, IconSize::new(180).unwrap())?;
//! persister.persist(&image)?;
//! Manifest::for_catalog(SizeCatalog::IOS).write_to("out")?;
//! # Ok::<(), iconset_renderer::Error>(())
//! ```

mod error;
mod generator;
mod icon;
mod manifest;
mod persist;
mod svg;

pub use error::{BoxedCause, Error, Result};
pub use generator::{
    DEFAULT_OUTPUT_DIR, DEFAULT_SOURCE, GeneratorConfig, IconSetGenerator, Phase, Run, RunReport,
    SizeOutcome, SizeStatus,
};
pub use icon::{IconSize, RasterImage, SizeCatalog};
pub use manifest::{
    ImageDescriptor, MANIFEST_AUTHOR, MANIFEST_FILENAME, MANIFEST_VERSION, Manifest, ManifestInfo,
};
pub use persist::{PngPersister, icon_filename};
pub use svg::{Rasterize, SvgRasterizer, VectorSource, parse_svg, render_tree};
