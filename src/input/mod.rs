//! Interactive stop entry.
//!
//! Asks for the number of deliveries, then each delivery's coordinates and
//! priority. Invalid answers are re-prompted rather than failing the run.
//! The depot is placed at the origin ahead of the deliveries.
//!
//! Works over any [`BufRead`]/[`Write`] pair, so it can be driven by a
//! terminal or by a scripted buffer.

use std::io::{self, BufRead, Write};

use crate::error::{Error, Result};
use crate::models::{Point, PriorityClass, Stop};

/// Message shown after an unrecognized priority label.
pub const INVALID_PRIORITY_MESSAGE: &str = "Invalid priority. Please enter high, medium, or low.";

/// Line-oriented prompt session.
///
/// # Examples
///
/// ```
/// use u_delivery::input::Prompter;
///
/// let answers = "1\n2.5\n-1\nurgent\nhigh\n";
/// let mut out = Vec::new();
/// let stops = Prompter::new(answers.as_bytes(), &mut out).read_stops().unwrap();
/// assert_eq!(stops.len(), 2);
/// assert!(stops[0].is_depot());
/// assert_eq!(stops[1].priority().unwrap().as_str(), "high");
/// assert!(String::from_utf8(out).unwrap().contains("Invalid priority"));
/// ```
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// Creates a session reading answers from `input` and writing prompts
    /// to `output`.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Prints `prompt` and reads one trimmed line.
    ///
    /// Fails with an [`io::ErrorKind::UnexpectedEof`] error if input ends.
    fn ask(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(Error::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input ended before all stops were entered",
            )));
        }
        Ok(line.trim().to_string())
    }

    /// Reads the number of deliveries, re-prompting until it parses.
    pub fn read_count(&mut self) -> Result<usize> {
        loop {
            let answer = self.ask("Enter the number of delivery locations: ")?;
            match answer.parse::<usize>() {
                Ok(n) => return Ok(n),
                Err(_) => writeln!(self.output, "Please enter a whole number.")?,
            }
        }
    }

    /// Reads one finite coordinate, re-prompting until it parses.
    pub fn read_coordinate(&mut self, axis: char) -> Result<f64> {
        let prompt = format!("Enter {axis}-coordinate: ");
        loop {
            let answer = self.ask(&prompt)?;
            match answer.parse::<f64>() {
                Ok(v) if v.is_finite() => return Ok(v),
                _ => writeln!(self.output, "Please enter a number.")?,
            }
        }
    }

    /// Reads a priority label, re-prompting until it is recognized.
    pub fn read_priority(&mut self) -> Result<PriorityClass> {
        loop {
            let answer = self.ask("Enter priority (high/medium/low): ")?;
            match answer.parse::<PriorityClass>() {
                Ok(p) => return Ok(p),
                Err(e) => {
                    log::debug!("rejected priority answer: {e}");
                    writeln!(self.output, "{INVALID_PRIORITY_MESSAGE}")?;
                }
            }
        }
    }

    /// Runs the full session: count, then x, y and priority per delivery.
    ///
    /// Returns the depot (at the origin) followed by the deliveries in
    /// entry order.
    pub fn read_stops(&mut self) -> Result<Vec<Stop>> {
        let n = self.read_count()?;
        let mut stops = Vec::with_capacity(n + 1);
        stops.push(Stop::depot(Point::origin()));
        for i in 0..n {
            writeln!(self.output, "\nLocation {}:", i + 1)?;
            let x = self.read_coordinate('x')?;
            let y = self.read_coordinate('y')?;
            let priority = self.read_priority()?;
            stops.push(Stop::delivery(Point::new(x, y), priority));
        }
        Ok(stops)
    }
}

/// Reads stops interactively from standard input.
pub fn read_stops_from_stdin() -> Result<Vec<Stop>> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    Prompter::new(stdin.lock(), stdout.lock()).read_stops()
}
