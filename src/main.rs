use std::path::PathBuf;

use clap::Parser;
use iconset_renderer::{DEFAULT_OUTPUT_DIR, DEFAULT_SOURCE, GeneratorConfig, IconSetGenerator};
use log::{LevelFilter, error};
use simplelog::{ColorChoice, TermLogger, TerminalMode};

/// Render an SVG into an iOS app icon set with a Contents.json manifest.
#[derive(Parser)]
#[clap(version)]
struct Cli {
    #[clap(long, short = 'l', default_value = "info")]
    log_level: LevelFilter,

    /// The master SVG artwork.
    #[clap(long, short, default_value = DEFAULT_SOURCE)]
    source: PathBuf,

    /// Directory the icons and manifest are written to.
    #[clap(long, short, default_value = DEFAULT_OUTPUT_DIR)]
    output: PathBuf,

    /// Do not load system fonts; `<text>` elements will not render.
    #[clap(long)]
    no_system_fonts: bool,
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = TermLogger::init(
        cli.log_level,
        Default::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    ) {
        eprintln!("Could not initialize logging: {err}");
    }

    let config = GeneratorConfig::new()
        .with_source(cli.source)
        .with_output_dir(cli.output)
        .with_system_fonts(!cli.no_system_fonts);

    match IconSetGenerator::new(&config).run() {
        Ok(report) => println!("\n{report}"),
        Err(err) => error!("{err}"),
    }
}
