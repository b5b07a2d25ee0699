//! Layered run settings: built-in defaults, then an optional JSON file, then
//! command-line flags. Whatever is still unset is asked for interactively.
use anyhow::{Context, Result};
use percolation_game::{SweepConfig, Topology, validate_precision};
use serde::{Deserialize, Serialize};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use crate::prompt::Prompter;

/// Optional defaults loaded from `--config`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub precision: Option<f64>,
    #[serde(default)]
    pub topology: Option<Topology>,
    #[serde(default)]
    pub fit_degree: Option<usize>,
    #[serde(default)]
    pub plot_dir: Option<PathBuf>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_json_str(&raw)
            .with_context(|| format!("failed to parse config {}", path.display()))
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// Values given on the command line; `None` means "not given".
#[derive(Debug, Clone, Default)]
pub struct FlagValues {
    pub precision: Option<f64>,
    pub lattice: Option<String>,
    pub degree: Option<usize>,
    pub interactive: bool,
}

/// Resolve the sweep inputs. Flags win over the file; the file wins over
/// prompting; defaults apply only when prompting is disabled.
pub fn resolve_sweep<R: BufRead, W: Write>(
    flags: &FlagValues,
    file: &FileConfig,
    prompter: &mut Prompter<R, W>,
) -> Result<SweepConfig> {
    let defaults = SweepConfig::default();

    let precision = match flags.precision.or(file.precision) {
        Some(value) => {
            validate_precision(value).context("invalid precision")?;
            value
        }
        None if flags.interactive => prompter.precision()?,
        None => defaults.precision,
    };

    let topology = match (&flags.lattice, file.topology) {
        (Some(raw), _) => raw
            .parse::<Topology>()
            .context("invalid lattice selection")?,
        (None, Some(topology)) => topology,
        (None, None) if flags.interactive => prompter.topology()?,
        (None, None) => defaults.topology,
    };

    let config = SweepConfig::new(precision, topology);
    log::debug!("resolved sweep config {config:?}");
    Ok(config)
}

/// Resolve the polynomial degree; 0 disables fitting.
pub fn resolve_fit_degree<R: BufRead, W: Write>(
    flags: &FlagValues,
    file: &FileConfig,
    prompter: &mut Prompter<R, W>,
) -> Result<usize> {
    match flags.degree.or(file.fit_degree) {
        Some(degree) => Ok(degree),
        None if flags.interactive => prompter.degree(),
        None => Ok(0),
    }
}

/// Directory for plot files, or `None` when plotting is switched off.
#[must_use]
pub fn resolve_plot_dir(
    flag: Option<PathBuf>,
    file: &FileConfig,
    disabled: bool,
) -> Option<PathBuf> {
    if disabled {
        return None;
    }
    Some(
        flag.or_else(|| file.plot_dir.clone())
            .unwrap_or_else(|| PathBuf::from(".")),
    )
}
