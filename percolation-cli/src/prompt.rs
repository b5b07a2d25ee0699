//! Interactive acquisition of the sweep inputs.
//!
//! Each question is repeated until the answer is valid. Questions go to the
//! prompter's writer (stderr in the binary) so stdout stays clean for reports.
use anyhow::{Result, bail};
use percolation_game::{Topology, validate_precision};
use std::io::{BufRead, Write};

const INVALID_INPUT: &str = "Invalid input, try again.";
const PRECISION_OUT_OF_RANGE: &str =
    "You should choose a positive precision, and it should be 0.05 or less.";
const DEGREE_NEGATIVE: &str = "You should choose a positive integer.";

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn ask(&mut self, question: &str) -> Result<String> {
        writeln!(self.output, "{question}")?;
        self.output.flush()?;
        let mut answer = String::new();
        if self.input.read_line(&mut answer)? == 0 {
            bail!("input closed before a valid answer was given");
        }
        Ok(answer.trim().to_string())
    }

    fn reject(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{message}")?;
        Ok(())
    }

    pub fn precision(&mut self) -> Result<f64> {
        loop {
            let answer =
                self.ask("What level of precision to use? (Distance between values of q.)")?;
            match answer.parse::<f64>() {
                Ok(value) if validate_precision(value).is_ok() => return Ok(value),
                Ok(_) => self.reject(PRECISION_OUT_OF_RANGE)?,
                Err(_) => self.reject(INVALID_INPUT)?,
            }
        }
    }

    /// Only the single-letter codes are offered here.
    pub fn topology(&mut self) -> Result<Topology> {
        loop {
            let answer = self.ask(
                "What lattice structure to use? Input W for the wedge Z_2 (x>=y) or Z for the complete grid Z_2.",
            )?;
            match answer.to_ascii_uppercase().as_str() {
                "W" => return Ok(Topology::Wedge),
                "Z" => return Ok(Topology::FullGrid),
                _ => self.reject(INVALID_INPUT)?,
            }
        }
    }

    pub fn degree(&mut self) -> Result<usize> {
        loop {
            let answer = self.ask(
                "What degree for the polynomial fit? If you do not want to try a fit, enter 0.",
            )?;
            match answer.parse::<i64>() {
                Ok(value) => match usize::try_from(value) {
                    Ok(degree) => return Ok(degree),
                    Err(_) => self.reject(DEGREE_NEGATIVE)?,
                },
                Err(_) => self.reject(INVALID_INPUT)?,
            }
        }
    }
}
