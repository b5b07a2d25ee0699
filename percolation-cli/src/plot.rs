//! SVG rendering of the win-probability curve and its polynomial fit.
use anyhow::{Context, Result};
use percolation_game::constants::{AXIS_LABEL_Q, AXIS_LABEL_WIN};
use percolation_game::{Polynomial, WinCurve};
use plotters::prelude::*;
use std::ops::Range;
use std::path::{Path, PathBuf};

pub const CURVE_PLOT_FILE: &str = "percolation_game_data.svg";
pub const FIT_PLOT_FILE: &str = "percolation_polyfit.svg";

const PLOT_SIZE: (u32, u32) = (1200, 700);

fn svg_root(out_path: &Path) -> SVGBackend<'_> {
    log::info!("writing plot {}", out_path.display());
    SVGBackend::new(out_path, PLOT_SIZE)
}

/// Vertical range covering every series with a little headroom.
fn value_range<'a>(series: impl IntoIterator<Item = &'a [f64]>) -> Range<f64> {
    let (lo, hi) = series
        .into_iter()
        .flatten()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    if !lo.is_finite() || !hi.is_finite() {
        return 0.0..1.0;
    }
    let pad = ((hi - lo) * 0.05).max(1e-3);
    (lo - pad)..(hi + pad)
}

fn ensure_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create plot directory {}", dir.display()))
}

/// Plot win probability against `q`; returns the written path.
pub fn render_curve(dir: &Path, curve: &WinCurve) -> Result<PathBuf> {
    ensure_dir(dir)?;
    let out_path = dir.join(CURVE_PLOT_FILE);
    draw_curve(&out_path, curve)?;
    Ok(out_path)
}

fn draw_curve(out_path: &Path, curve: &WinCurve) -> Result<()> {
    let probabilities = curve.probabilities();
    let root = svg_root(out_path).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(curve.topology().plot_title(), ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0f64..1.0f64, value_range([probabilities.as_slice()]))?;

    chart
        .configure_mesh()
        .x_desc(AXIS_LABEL_Q)
        .y_desc(AXIS_LABEL_WIN)
        .x_labels(10)
        .draw()?;

    chart.draw_series(LineSeries::new(
        curve.points().iter().map(|p| (p.q, p.win_probability)),
        BLUE,
    ))?;

    root.present()?;
    Ok(())
}

/// Overlay the fitted polynomial, sampled at the curve's own `q` values.
pub fn render_fit(dir: &Path, curve: &WinCurve, poly: &Polynomial) -> Result<PathBuf> {
    ensure_dir(dir)?;
    let out_path = dir.join(FIT_PLOT_FILE);
    let qs = curve.qs();
    let probabilities = curve.probabilities();
    let fitted = poly.sample(&qs);
    draw_fit(&out_path, &qs, &probabilities, &fitted, poly.degree())?;
    Ok(out_path)
}

fn draw_fit(
    out_path: &Path,
    qs: &[f64],
    probabilities: &[f64],
    fitted: &[f64],
    degree: usize,
) -> Result<()> {
    let root = svg_root(out_path).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0f64..1.0f64, value_range([probabilities, fitted]))?;

    chart
        .configure_mesh()
        .x_desc(AXIS_LABEL_Q)
        .y_desc(AXIS_LABEL_WIN)
        .x_labels(10)
        .draw()?;

    chart
        .draw_series(LineSeries::new(
            qs.iter().copied().zip(probabilities.iter().copied()),
            BLUE,
        ))?
        .label("Winning probability data")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));
    chart
        .draw_series(LineSeries::new(
            qs.iter().copied().zip(fitted.iter().copied()),
            RED,
        ))?
        .label(format!("Degree {degree} polynomial Fit"))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}
