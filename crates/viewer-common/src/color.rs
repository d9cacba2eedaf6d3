//! Colour ramps built from sparse breakpoint tables.
//!
//! A [`BreakpointTable`] maps scalar keys (for example a fractional month of
//! the year) to `#rrggbb` colours. Lookups interpolate linearly between the
//! two keys that bracket the queried value.
//!
//! Keys are sorted when the table is built and brackets are found with a
//! binary search, so the order entries are supplied in never matters.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while building or evaluating a breakpoint table.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ColorError {
    #[error("Invalid hex colour: {0}")]
    InvalidHex(String),

    #[error("Breakpoint table needs at least 2 distinct keys, got {0}")]
    Degenerate(usize),

    #[error("Duplicate breakpoint key: {0}")]
    DuplicateKey(f64),

    #[error("Breakpoint key must be finite, got {0}")]
    NonFiniteKey(f64),

    #[error("Cannot interpolate a non-finite value: {0}")]
    NonFinite(f64),
}

/// An opaque 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (the leading `#` is optional).
    pub fn parse_hex(s: &str) -> Result<Self, ColorError> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(ColorError::InvalidHex(s.to_string()));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| ColorError::InvalidHex(s.to_string()))
        };

        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    /// Format as `#rrggbb` with lowercase digits.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Blend towards `upper` by `weight` (0 gives `self`, 1 gives `upper`).
    ///
    /// Weights outside [0, 1] extrapolate; each channel is clamped to a byte.
    pub fn mix(&self, upper: &Rgb, weight: f64) -> Rgb {
        Rgb {
            r: interpolate_channel(self.r, upper.r, weight),
            g: interpolate_channel(self.g, upper.g, weight),
            b: interpolate_channel(self.b, upper.b, weight),
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hex(s)
    }
}

impl Serialize for Rgb {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Rgb::parse_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Interpolate a single byte channel.
///
/// Rounds to the nearest integer with exact ties going down, so the midpoint
/// of 0x00 and 0xff is 0x7f.
pub fn interpolate_channel(lower: u8, upper: u8, weight: f64) -> u8 {
    let mixed = f64::from(upper) * weight + f64::from(lower) * (1.0 - weight);
    let rounded = (mixed - 0.5).ceil();
    rounded.clamp(0.0, 255.0) as u8
}

/// Behaviour for values outside the table's key range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutOfRange {
    /// Use the colour of the nearest end of the table.
    #[default]
    Clamp,
    /// Extrapolate the nearest segment linearly, clamping each channel.
    Extend,
}

/// A sorted, immutable breakpoint table.
#[derive(Debug, Clone, PartialEq)]
pub struct BreakpointTable {
    stops: Vec<(f64, Rgb)>,
    out_of_range: OutOfRange,
}

impl BreakpointTable {
    /// Build a table from `(key, "#rrggbb")` pairs in any order.
    pub fn new<I, S>(entries: I) -> Result<Self, ColorError>
    where
        I: IntoIterator<Item = (f64, S)>,
        S: AsRef<str>,
    {
        let stops = entries
            .into_iter()
            .map(|(key, color)| Ok((key, Rgb::parse_hex(color.as_ref())?)))
            .collect::<Result<Vec<_>, ColorError>>()?;
        Self::from_stops(stops)
    }

    /// Build a table from already-parsed colours.
    pub fn from_stops(mut stops: Vec<(f64, Rgb)>) -> Result<Self, ColorError> {
        if let Some((key, _)) = stops.iter().find(|(key, _)| !key.is_finite()) {
            return Err(ColorError::NonFiniteKey(*key));
        }

        stops.sort_by(|a, b| a.0.total_cmp(&b.0));

        if let Some(pair) = stops.windows(2).find(|pair| pair[0].0 == pair[1].0) {
            return Err(ColorError::DuplicateKey(pair[0].0));
        }

        if stops.len() < 2 {
            return Err(ColorError::Degenerate(stops.len()));
        }

        Ok(Self {
            stops,
            out_of_range: OutOfRange::default(),
        })
    }

    pub fn with_out_of_range(mut self, out_of_range: OutOfRange) -> Self {
        self.out_of_range = out_of_range;
        self
    }

    pub fn out_of_range(&self) -> OutOfRange {
        self.out_of_range
    }

    /// Breakpoints sorted by key.
    pub fn stops(&self) -> &[(f64, Rgb)] {
        &self.stops
    }

    /// Smallest and largest key.
    pub fn domain(&self) -> (f64, f64) {
        (self.stops[0].0, self.stops[self.stops.len() - 1].0)
    }

    /// Interpolated colour at `value`, formatted as `#rrggbb`.
    pub fn interpolate(&self, value: f64) -> Result<String, ColorError> {
        Ok(self.interpolate_rgb(value)?.to_hex())
    }

    /// Interpolated colour at `value`.
    pub fn interpolate_rgb(&self, value: f64) -> Result<Rgb, ColorError> {
        if !value.is_finite() {
            return Err(ColorError::NonFinite(value));
        }

        let last = self.stops.len() - 1;
        // Number of keys <= value; the upper bound is the first key > value.
        let upper = self.stops.partition_point(|(key, _)| *key <= value);

        let (lo, hi) = if upper == 0 {
            match self.out_of_range {
                OutOfRange::Clamp => return Ok(self.stops[0].1),
                OutOfRange::Extend => (0, 1),
            }
        } else if upper > last {
            if self.stops[last].0 == value {
                return Ok(self.stops[last].1);
            }
            match self.out_of_range {
                OutOfRange::Clamp => return Ok(self.stops[last].1),
                OutOfRange::Extend => (last - 1, last),
            }
        } else {
            (upper - 1, upper)
        };

        let (lower_key, lower_color) = self.stops[lo];
        let (upper_key, upper_color) = self.stops[hi];
        let weight = (value - lower_key) / (upper_key - lower_key);

        Ok(lower_color.mix(&upper_color, weight))
    }
}
