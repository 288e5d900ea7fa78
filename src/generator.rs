//! End-to-end icon set generation.
//!
//! [`IconSetGenerator`] validates the vector source, renders every size in
//! the catalog and writes the manifest. A run is an explicit state machine
//! ([`Run`] / [`Phase`]) so each transition can be driven and observed on
//! its own:
//!
//! ```text
//! NotStarted ─┬─> SourceValidated ─> Rendering{0..n} ─> ManifestWritten ─> Done
//!             └─> AbortedMissingSource
//! ```
//!
//! A size that fails to rasterize or persist is recorded as skipped and the
//! run moves on. The manifest is written after the last size no matter how
//! many of them succeeded.

use std::fmt;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::error::{Error, Result};
use crate::icon::{IconSize, SizeCatalog};
use crate::manifest::{MANIFEST_FILENAME, Manifest};
use crate::persist::PngPersister;
use crate::svg::{Rasterize, SvgRasterizer, VectorSource};

/// Default vector source, relative to the working directory.
pub const DEFAULT_SOURCE: &str = "app_icon.svg";

/// Default output directory, relative to the working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "AppIconSet.appiconset";

// ============================================================================
// GeneratorConfig
// ============================================================================

/// Where to read the artwork from and where to put the icon set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Path of the master SVG artwork.
    pub source: PathBuf,

    /// Directory the PNG files and `Contents.json` are written to.
    pub output_dir: PathBuf,

    /// Load system fonts so `<text>` elements render.
    pub system_fonts: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from(DEFAULT_SOURCE),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            system_fonts: false,
        }
    }
}

impl GeneratorConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the vector source path.
    pub fn with_source(mut self, source: impl Into<PathBuf>) -> Self {
        self.source = source.into();
        self
    }

    /// Sets the output directory.
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    /// Sets whether system fonts are loaded.
    pub fn with_system_fonts(mut self, system_fonts: bool) -> Self {
        self.system_fonts = system_fonts;
        self
    }
}

// ============================================================================
// Outcomes
// ============================================================================

/// What happened to a single size.
#[derive(Debug)]
pub enum SizeStatus {
    /// The icon was rendered and written to `path`.
    Recorded { path: PathBuf },

    /// Rasterizing or writing failed; nothing was kept for this size.
    Skipped { error: Error },
}

/// The result of rendering and writing one catalog entry.
#[derive(Debug)]
pub struct SizeOutcome {
    /// The size that was attempted.
    pub size: IconSize,
    /// Whether it was written or skipped.
    pub status: SizeStatus,
}

impl SizeOutcome {
    /// Returns `true` if the icon file was written.
    pub fn is_recorded(&self) -> bool {
        matches!(self.status, SizeStatus::Recorded { .. })
    }

    /// Path of the written file, if the size succeeded.
    pub fn path(&self) -> Option<&Path> {
        match &self.status {
            SizeStatus::Recorded { path } => Some(path),
            SizeStatus::Skipped { .. } => None,
        }
    }

    /// The reason the size was skipped, if it failed.
    pub fn error(&self) -> Option<&Error> {
        match &self.status {
            SizeStatus::Recorded { .. } => None,
            SizeStatus::Skipped { error } => Some(error),
        }
    }
}

// ============================================================================
// RunReport
// ============================================================================

/// Summary of a completed run.
///
/// Its [`Display`](fmt::Display) form is the human-readable report printed
/// at the end of a run, including how to install the icons in Xcode.
#[derive(Debug)]
pub struct RunReport {
    /// Directory the icon set was written to.
    pub output_dir: PathBuf,
    /// One outcome per catalog size, in catalog order.
    pub outcomes: Vec<SizeOutcome>,
    /// Path of the written `Contents.json`.
    pub manifest_path: PathBuf,
}

impl RunReport {
    /// Outcomes of the sizes that were written.
    pub fn succeeded(&self) -> impl Iterator<Item = &SizeOutcome> {
        self.outcomes.iter().filter(|o| o.is_recorded())
    }

    /// Outcomes of the sizes that failed.
    pub fn skipped(&self) -> impl Iterator<Item = &SizeOutcome> {
        self.outcomes.iter().filter(|o| !o.is_recorded())
    }

    /// Returns `true` if every size was written.
    pub fn is_complete(&self) -> bool {
        self.outcomes.iter().all(SizeOutcome::is_recorded)
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Generated {} of {} icons in {}",
            self.succeeded().count(),
            self.outcomes.len(),
            self.output_dir.display()
        )?;
        for outcome in self.skipped() {
            if let Some(error) = outcome.error() {
                writeln!(f, "  skipped {}: {error}", outcome.size)?;
            }
        }
        writeln!(f, "Manifest written to {}", self.manifest_path.display())?;
        writeln!(f)?;
        writeln!(f, "To use the icons:")?;
        writeln!(f, "1. Open Assets.xcassets in Xcode")?;
        writeln!(f, "2. Right-click AppIcon and choose \"Show in Finder\"")?;
        writeln!(f, "3. Copy the generated files into the AppIcon.appiconset folder")?;
        write!(f, "4. Rebuild the project in Xcode")
    }
}

// ============================================================================
// Phase
// ============================================================================

/// Where a [`Run`] currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing has been checked or written yet.
    NotStarted,
    /// The vector source exists.
    SourceValidated,
    /// Output directory exists; `next` is the catalog index rendered next.
    Rendering { next: usize },
    /// Every size was attempted and `Contents.json` is on disk.
    ManifestWritten,
    /// The summary was logged; the run is over.
    Done,
    /// The vector source was missing; nothing was written.
    AbortedMissingSource,
}

impl Phase {
    /// Returns `true` for [`Phase::Done`] and [`Phase::AbortedMissingSource`].
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::AbortedMissingSource)
    }
}

// ============================================================================
// IconSetGenerator
// ============================================================================

/// Renders a vector source into an app icon set.
///
/// # Example
///
/// ```no_run
/// use iconset_renderer::{GeneratorConfig, IconSetGenerator};
///
/// let config = GeneratorConfig::new()
///     .with_source("art/app_icon.svg")
///     .with_output_dir("build/AppIconSet.appiconset");
///
/// let report = IconSetGenerator::new(&config).run()?;
/// println!("{report}");
/// # Ok::<(), iconset_renderer::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct IconSetGenerator<R = SvgRasterizer> {
    source: VectorSource,
    persister: PngPersister,
    catalog: SizeCatalog,
    rasterizer: R,
}

impl IconSetGenerator<SvgRasterizer> {
    /// Creates a generator backed by the resvg rasterizer.
    pub fn new(config: &GeneratorConfig) -> Self {
        let rasterizer = if config.system_fonts {
            SvgRasterizer::with_system_fonts()
        } else {
            SvgRasterizer::new()
        };
        Self::with_rasterizer(config, rasterizer)
    }
}

impl<R: Rasterize> IconSetGenerator<R> {
    /// Creates a generator that renders with `rasterizer`.
    pub fn with_rasterizer(config: &GeneratorConfig, rasterizer: R) -> Self {
        Self {
            source: VectorSource::new(&config.source),
            persister: PngPersister::new(&config.output_dir),
            catalog: SizeCatalog::IOS,
            rasterizer,
        }
    }

    /// The vector source being rendered.
    pub fn source(&self) -> &VectorSource {
        &self.source
    }

    /// Directory the icon set is written to.
    pub fn output_dir(&self) -> &Path {
        self.persister.output_dir()
    }

    /// The sizes rendered by every run.
    pub fn catalog(&self) -> SizeCatalog {
        self.catalog
    }

    /// Begins a run without performing any work yet.
    pub fn start(&self) -> Run<'_, R> {
        Run {
            generator: self,
            phase: Phase::NotStarted,
            outcomes: Vec::with_capacity(self.catalog.len()),
            manifest_path: None,
        }
    }

    /// Performs a whole run.
    ///
    /// Fails only if the source is missing or the output directory or
    /// manifest cannot be written. Individual sizes that fail are reported
    /// as skipped in the returned [`RunReport`].
    pub fn run(&self) -> Result<RunReport> {
        self.start().finish()
    }

    fn render_one(&self, size: IconSize) -> SizeOutcome {
        let status = match self
            .rasterizer
            .rasterize(&self.source, size)
            .and_then(|image| self.persister.persist(&image))
        {
            Ok(path) => {
                info!("Wrote {}", path.display());
                SizeStatus::Recorded { path }
            }
            Err(error) => {
                warn!("Skipping {size}: {error}");
                SizeStatus::Skipped { error }
            }
        };
        SizeOutcome { size, status }
    }
}

// ============================================================================
// Run
// ============================================================================

/// A single pass over the catalog, advanced one transition at a time.
pub struct Run<'a, R> {
    generator: &'a IconSetGenerator<R>,
    phase: Phase,
    outcomes: Vec<SizeOutcome>,
    manifest_path: Option<PathBuf>,
}

impl<R: Rasterize> Run<'_, R> {
    /// The phase the run is in.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Outcomes of the sizes processed so far, in catalog order.
    pub fn outcomes(&self) -> &[SizeOutcome] {
        &self.outcomes
    }

    /// Performs the next transition and returns the phase reached.
    ///
    /// Terminal phases are left unchanged. A missing source moves the run
    /// to [`Phase::AbortedMissingSource`] and returns the error; a failed
    /// directory or manifest write returns the error without advancing.
    pub fn step(&mut self) -> Result<Phase> {
        let generator = self.generator;
        let next = match self.phase {
            Phase::NotStarted => {
                if !generator.source.exists() {
                    debug!("Run phase {:?} -> {:?}", self.phase, Phase::AbortedMissingSource);
                    self.phase = Phase::AbortedMissingSource;
                    return Err(self.missing_source());
                }
                Phase::SourceValidated
            }
            Phase::SourceValidated => {
                generator.persister.ensure_output_dir()?;
                Phase::Rendering { next: 0 }
            }
            Phase::Rendering { next } => match generator.catalog.get(next) {
                Some(size) => {
                    self.outcomes.push(generator.render_one(size));
                    Phase::Rendering { next: next + 1 }
                }
                None => {
                    let manifest = Manifest::for_catalog(generator.catalog);
                    let path = manifest.write_to(generator.output_dir())?;
                    info!("Wrote {}", path.display());
                    self.manifest_path = Some(path);
                    Phase::ManifestWritten
                }
            },
            Phase::ManifestWritten => {
                info!(
                    "Icon set complete: {} of {} sizes written",
                    self.outcomes.iter().filter(|o| o.is_recorded()).count(),
                    self.outcomes.len()
                );
                Phase::Done
            }
            Phase::AbortedMissingSource => return Err(self.missing_source()),
            Phase::Done => Phase::Done,
        };

        if next != self.phase {
            debug!("Run phase {:?} -> {:?}", self.phase, next);
            self.phase = next;
        }
        Ok(next)
    }

    /// Steps until the run is done and returns its report.
    pub fn finish(mut self) -> Result<RunReport> {
        while !self.phase.is_terminal() {
            self.step()?;
        }
        if self.phase == Phase::AbortedMissingSource {
            return Err(self.missing_source());
        }

        let manifest_path = self
            .manifest_path
            .unwrap_or_else(|| self.generator.output_dir().join(MANIFEST_FILENAME));
        Ok(RunReport {
            output_dir: self.generator.output_dir().to_path_buf(),
            outcomes: self.outcomes,
            manifest_path,
        })
    }

    fn missing_source(&self) -> Error {
        Error::MissingSource {
            path: self.generator.source.path().to_path_buf(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
