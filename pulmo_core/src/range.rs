//! Parameter range strings.
//!
//! A model declares each parameter's range as human-readable text such as
//! `"0 to 100"` or `"-5 to -1"`. Hosts that sweep or estimate parameters
//! additionally accept a step after a semicolon: `"0 to 100; 5"`. A bare
//! number is a range holding a single value.
//!
//! The range is advisory. Models never read it back, and an absent or
//! malformed range only means the host cannot sweep that parameter.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const RANGE_SEP: &str = " to ";
const STEP_SEP: char = ';';

/// Slack added to the upper bound when enumerating a sweep
const SEQUENCE_SLACK: f64 = 0.001;

/// Parsed `min to max; step` range
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Range {
    min: f64,
    max: f64,
    step: f64,
}

impl Range {
    /// Build a range from explicit bounds
    ///
    /// Fails when the step is not a positive finite number.
    pub fn new(min: f64, max: f64, step: f64) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(Error::range(
                &format!("{} to {}; {}", min, max, step),
                "bounds must be finite",
            ));
        }
        if !(step.is_finite() && step > 0.0) {
            return Err(Error::range(
                &format!("{} to {}; {}", min, max, step),
                "step must be a positive number",
            ));
        }
        Ok(Self { min, max, step })
    }

    /// Parse a range string
    pub fn parse(input: &str) -> Result<Self> {
        let mut parts = input.split(STEP_SEP);
        let bounds = parts.next().unwrap_or_default();
        let step = parts.next();
        if parts.next().is_some() {
            return Err(Error::range(input, "more than one ';'"));
        }

        let mut ends = bounds.split(RANGE_SEP);
        let min_text = ends.next().unwrap_or_default();
        let max_text = ends.next();
        if ends.next().is_some() {
            return Err(Error::range(input, "more than one 'to'"));
        }

        let min = parse_number(input, min_text)?;
        let max = match max_text {
            Some(text) => parse_number(input, text)?,
            None => min,
        };
        let step = match step {
            Some(text) => parse_number(input, text)?,
            None => 1.0,
        };

        if step <= 0.0 {
            return Err(Error::range(input, "step must be a positive number"));
        }

        Ok(Self { min, max, step })
    }

    /// True if the string spells out both bounds and a step
    pub fn is_sweep(input: &str) -> bool {
        let parts: Vec<&str> = input.split(STEP_SEP).collect();
        parts.len() == 2 && parts[0].split(RANGE_SEP).count() == 2
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Values a host sweep visits, starting at `min`
    pub fn sequence(&self) -> Vec<f64> {
        let mut values = vec![self.min];
        let limit = self.max + SEQUENCE_SLACK;
        let mut i = 1u32;
        loop {
            let v = self.min + f64::from(i) * self.step;
            if v >= limit {
                break;
            }
            values.push(v);
            i += 1;
        }
        values
    }

    /// Number of values in `sequence()`
    pub fn sequence_count(&self) -> usize {
        self.sequence().len()
    }

    /// Lossless `min to max; step` text, used for serialization
    pub fn to_canonical_string(&self) -> String {
        format!("{}{}{}{} {}", self.min, RANGE_SEP, self.max, STEP_SEP, self.step)
    }

    /// True if `value` lies within the closed bounds
    pub fn includes(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// True if `other` lies within this range, allowing one ulp-scale of slack
    pub fn contains(&self, other: &Range) -> bool {
        other.min - self.min >= -f64::EPSILON * scale(self.min)
            && other.max - self.max <= f64::EPSILON * scale(self.max)
    }
}

fn scale(v: f64) -> f64 {
    v.abs().max(f64::MIN_POSITIVE)
}

fn parse_number(input: &str, text: &str) -> Result<f64> {
    let text = text.trim();
    let value: f64 = text
        .parse()
        .map_err(|_| Error::range(input, format!("'{}' is not a number", text)))?;
    if !value.is_finite() {
        return Err(Error::range(input, format!("'{}' is not finite", text)));
    }
    Ok(value)
}

impl FromStr for Range {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Range::parse(s)
    }
}

impl TryFrom<String> for Range {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Range::parse(&s)
    }
}

impl From<Range> for String {
    fn from(range: Range) -> Self {
        range.to_canonical_string()
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.sequence().len() == 1 {
            write!(f, "{}", self.min)
        } else {
            f.write_str(&self.to_canonical_string())
        }
    }
}
