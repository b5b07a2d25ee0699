mod config;
mod plot;
mod prompt;
mod reports;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use percolation_game::{Polynomial, WinCurve, fit_curve, run_sweep};
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use config::{FileConfig, FlagValues, resolve_fit_degree, resolve_plot_dir, resolve_sweep};
use prompt::Prompter;

#[derive(Debug, Parser)]
#[command(name = "percolation-cli", version = "0.1.0")]
#[command(about = "Win probability of player 1 in the percolation game, swept over q")]
struct Args {
    /// Distance between consecutive values of q (positive, at most 0.05)
    #[arg(long, short)]
    precision: Option<f64>,

    /// Lattice structure: W for the wedge (x >= y) or Z for the complete grid
    #[arg(long, short)]
    lattice: Option<String>,

    /// Degree of the polynomial fit; 0 skips fitting
    #[arg(long, short)]
    degree: Option<usize>,

    /// JSON file providing precision, topology, fit_degree and plot_dir
    #[arg(long)]
    config: Option<PathBuf>,

    /// Never prompt; unset values fall back to defaults
    #[arg(long)]
    no_prompt: bool,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "markdown", "console", "csv"])]
    report: String,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Directory for the SVG plots (defaults to the current directory)
    #[arg(long)]
    plot_dir: Option<PathBuf>,

    /// Skip writing plots
    #[arg(long)]
    no_plot: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn flag_values(&self) -> FlagValues {
        FlagValues {
            precision: self.precision,
            lattice: self.lattice.clone(),
            degree: self.degree,
            interactive: !self.no_prompt,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.report == "console" {
        announce_banner();
    }

    let file_config = match &args.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };
    let flags = args.flag_values();
    let stdin = std::io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), std::io::stderr());

    let sweep = resolve_sweep(&flags, &file_config, &mut prompter)?;
    let start_time = Instant::now();
    let curve = run_sweep(&sweep)?;
    let sweep_time = start_time.elapsed();

    let plot_dir = resolve_plot_dir(args.plot_dir.clone(), &file_config, args.no_plot);
    if let Some(dir) = &plot_dir {
        plot::render_curve(dir, &curve)?;
    }

    let degree = resolve_fit_degree(&flags, &file_config, &mut prompter)?;
    let fit = fit_or_skip(&curve, degree);

    write_report(&args, &curve, fit.as_ref(), sweep_time)?;

    if let (Some(dir), Some(poly)) = (&plot_dir, &fit) {
        plot::render_fit(dir, &curve, poly)?;
    }

    Ok(())
}

fn announce_banner() {
    println!("{}", "🎲 Percolation Game Sweep".bright_cyan().bold());
    println!("{}", "=========================".cyan());
}

fn fit_if_requested(curve: &WinCurve, degree: usize) -> Result<Option<Polynomial>> {
    if degree == 0 {
        return Ok(None);
    }
    fit_curve(curve, degree)
        .map(Some)
        .with_context(|| format!("failed to fit a degree {degree} polynomial"))
}

/// A failed fit is reported and dropped; the curve itself is still written.
fn fit_or_skip(curve: &WinCurve, degree: usize) -> Option<Polynomial> {
    fit_if_requested(curve, degree).unwrap_or_else(|err| {
        log::warn!("polynomial fit skipped: {err:#}");
        eprintln!("⚠️  Skipping polynomial fit: {}", format!("{err:#}").yellow());
        None
    })
}

fn write_report(
    args: &Args,
    curve: &WinCurve,
    fit: Option<&Polynomial>,
    sweep_time: Duration,
) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;

    match args.report.as_str() {
        "json" => reports::generate_json_report(&mut output_target, curve, fit)?,
        "markdown" => reports::generate_markdown_report(&mut output_target, curve, fit)?,
        "csv" => reports::generate_csv_report(&mut output_target, curve, fit)?,
        _ => reports::generate_console_report(
            &mut output_target,
            curve,
            fit,
            args.verbose,
            sweep_time,
        )?,
    }

    output_target.flush_inner()?;
    if let Some(path) = &args.output {
        log::info!("wrote {} report to {}", args.report, path.display());
    }
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}
