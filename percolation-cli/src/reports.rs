use anyhow::Result;
use colored::Colorize;
use percolation_game::{Polynomial, WinCurve, truncation_bound};
use serde::Serialize;
use std::io::Write;
use std::time::Duration;

#[derive(Debug, Serialize)]
struct FitSummary {
    degree: usize,
    /// Highest power first.
    coefficients: Vec<f64>,
    polynomial: String,
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    fingerprint: String,
    curve: &'a WinCurve,
    #[serde(skip_serializing_if = "Option::is_none")]
    fit: Option<FitSummary>,
}

fn fit_summary(poly: &Polynomial) -> FitSummary {
    FitSummary {
        degree: poly.degree(),
        coefficients: poly.coefficients_descending(),
        polynomial: poly.to_string(),
    }
}

pub fn generate_console_report(
    out: &mut dyn Write,
    curve: &WinCurve,
    fit: Option<&Polynomial>,
    verbose: bool,
    total_duration: Duration,
) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "📊 Win Probability Summary".bright_cyan().bold())?;
    writeln!(out, "{}", "==========================".cyan())?;
    writeln!(out, "Lattice: {}", curve.topology().to_string().bold())?;
    writeln!(out, "Precision: {}", curve.precision())?;
    writeln!(out, "Points: {}", curve.len())?;
    writeln!(out, "Sweep time: {total_duration:?}")?;
    writeln!(out)?;

    if verbose {
        writeln!(out, "{:>10}  {:>8}  {:>16}", "q", "K", "win probability")?;
    } else {
        writeln!(out, "{:>10}  {:>16}", "q", "win probability")?;
    }
    for point in curve.points() {
        if verbose {
            let horizon = truncation_bound(point.q)?;
            writeln!(
                out,
                "{:>10.6}  {horizon:>8}  {:>16.12}",
                point.q, point.win_probability
            )?;
        } else {
            writeln!(out, "{:>10.6}  {:>16.12}", point.q, point.win_probability)?;
        }
    }
    writeln!(out)?;

    if let Some(poly) = fit {
        writeln!(out, "{}", "📈 Polynomial function:".bright_yellow().bold())?;
        writeln!(out, "{poly}")?;
        writeln!(out)?;
    }

    let trend = if curve.is_strictly_increasing() {
        "strictly increasing".green()
    } else {
        "not monotone".yellow()
    };
    writeln!(out, "Trend: {trend}")?;
    writeln!(out, "Fingerprint: {}", curve.fingerprint())?;
    Ok(())
}

pub fn generate_json_report(
    out: &mut dyn Write,
    curve: &WinCurve,
    fit: Option<&Polynomial>,
) -> Result<()> {
    let report = JsonReport {
        fingerprint: curve.fingerprint(),
        curve,
        fit: fit.map(fit_summary),
    };
    let json_output = serde_json::to_string_pretty(&report)?;
    writeln!(out, "{json_output}")?;
    Ok(())
}

pub fn generate_csv_report(
    out: &mut dyn Write,
    curve: &WinCurve,
    fit: Option<&Polynomial>,
) -> Result<()> {
    if fit.is_some() {
        writeln!(out, "q,win_probability,fitted")?;
    } else {
        writeln!(out, "q,win_probability")?;
    }
    for point in curve.points() {
        match fit {
            Some(poly) => writeln!(
                out,
                "{},{},{}",
                point.q,
                point.win_probability,
                poly.evaluate(point.q)
            )?,
            None => writeln!(out, "{},{}", point.q, point.win_probability)?,
        }
    }
    Ok(())
}

pub fn generate_markdown_report(
    out: &mut dyn Write,
    curve: &WinCurve,
    fit: Option<&Polynomial>,
) -> Result<()> {
    writeln!(out, "# Percolation Game Win Probability\n")?;

    writeln!(out, "## Summary\n")?;
    writeln!(out, "- **Lattice**: {}", curve.topology())?;
    writeln!(out, "- **Precision**: {}", curve.precision())?;
    writeln!(out, "- **Points**: {}", curve.len())?;
    writeln!(out, "- **Fingerprint**: `{}`\n", curve.fingerprint())?;

    writeln!(out, "## Curve\n")?;
    writeln!(out, "| q | win probability |")?;
    writeln!(out, "|---|---|")?;
    for point in curve.points() {
        writeln!(out, "| {:.6} | {:.12} |", point.q, point.win_probability)?;
    }

    if let Some(poly) = fit {
        writeln!(out, "\n## Degree {} Polynomial Fit\n", poly.degree())?;
        writeln!(out, "`{poly}`")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use percolation_game::{SweepConfig, Topology, fit_curve, run_sweep};

    fn coarse_curve() -> WinCurve {
        run_sweep(&SweepConfig::new(0.05, Topology::Wedge)).unwrap()
    }

    fn render(f: impl FnOnce(&mut dyn Write) -> Result<()>) -> String {
        let mut buf: Vec<u8> = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn csv_has_header_and_one_row_per_point() {
        let curve = coarse_curve();
        let text = render(|out| generate_csv_report(out, &curve, None));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "q,win_probability");
        assert_eq!(lines.len(), 20);
        assert!(lines[1].starts_with("0.05,0.38219357"));
    }

    #[test]
    fn csv_adds_fitted_column_with_fit() {
        let curve = coarse_curve();
        let poly = fit_curve(&curve, 2).unwrap();
        let text = render(|out| generate_csv_report(out, &curve, Some(&poly)));
        assert!(text.starts_with("q,win_probability,fitted\n"));
        assert!(text.lines().skip(1).all(|line| line.split(',').count() == 3));
    }

    #[test]
    fn json_includes_fingerprint_and_fit() {
        let curve = coarse_curve();
        let poly = fit_curve(&curve, 3).unwrap();
        let text = render(|out| generate_json_report(out, &curve, Some(&poly)));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["fingerprint"], curve.fingerprint());
        assert_eq!(value["curve"]["topology"], "wedge");
        assert_eq!(value["curve"]["points"].as_array().unwrap().len(), 19);
        assert_eq!(value["fit"]["degree"], 3);
        assert_eq!(value["fit"]["coefficients"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn json_omits_fit_when_skipped() {
        let curve = coarse_curve();
        let text = render(|out| generate_json_report(out, &curve, None));
        assert!(!text.contains("\"fit\""));
    }

    #[test]
    fn markdown_lists_every_point() {
        let curve = coarse_curve();
        let text = render(|out| generate_markdown_report(out, &curve, None));
        assert!(text.contains("# Percolation Game Win Probability"));
        assert_eq!(text.matches("\n| 0.").count(), 19);
    }

    #[test]
    fn console_verbose_shows_truncation_bound() {
        colored::control::set_override(false);
        let curve = coarse_curve();
        let poly = fit_curve(&curve, 1).unwrap();
        let text = render(|out| {
            generate_console_report(out, &curve, Some(&poly), true, Duration::from_millis(3))
        });
        assert!(text.contains("Win Probability Summary"));
        assert!(text.contains("1000"));
        assert!(text.contains("Polynomial function:"));
        assert!(text.contains("strictly increasing"));
    }
}
