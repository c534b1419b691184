use anyhow::{Context, Result};
use clap::Parser;
use patterns_bars::aggregate::Aggregator;
use patterns_bars::catalog::AlgorithmOrder;
use patterns_bars::chart::{generate_charts, ChartRenderer, SvgCanvas};
use patterns_bars::palette::PaletteMode;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "patterns-bars")]
#[command(about = "Plot the results of the patterns benchmark")]
struct Cli {
    /// Directory with the result files to plot
    root: PathBuf,

    /// Use another color palette
    #[arg(long = "alternative-palette", default_value = "false")]
    alternative_palette: bool,

    /// Output directory for charts
    #[arg(short, long, default_value = "./charts")]
    output: PathBuf,

    /// Print per-file progress while loading
    #[arg(short, long, default_value = "false")]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let palette = if cli.alternative_palette {
        PaletteMode::Generated
    } else {
        PaletteMode::Fixed
    };

    plot_results(&cli.root, &cli.output, palette, cli.verbose)
}

fn plot_results(root: &Path, output_dir: &Path, palette: PaletteMode, verbose: bool) -> Result<()> {
    println!("Loading results from {}...", root.display());
    let index = Aggregator::new(verbose)
        .load(root)
        .context("Failed to load benchmark results")?;

    if index.is_empty() {
        println!("  No results found, nothing to plot");
        return Ok(());
    }
    println!("  Found {} input sizes", index.len());

    std::fs::create_dir_all(output_dir).context("Failed to create output directory")?;

    println!("\nGenerating charts...");
    let renderer = ChartRenderer::new(AlgorithmOrder::default(), palette);
    let mut canvas = SvgCanvas::new();
    let written = generate_charts(&index, &renderer, &mut canvas, |size| {
        output_dir.join(format!("sorting_{}.svg", size))
    })?;

    println!("\nPlotted {} charts.", written.len());
    Ok(())
}
