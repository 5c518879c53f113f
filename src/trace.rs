// Copyright (c) 2024-2025 Ken Barker

// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"),
// to deal in the Software without restriction, including without limitation the
// rights to use, copy, modify, merge, publish, distribute, sublicense, and/or
// sell copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:

// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN
// THE SOFTWARE.

//! The trace module records the intermediate values of a calculation.
//!
//! A `Trace` is an ordered list of named values. The calculators return one
//! alongside their result, so that a caller can log or save it without the
//! calculation depending on where, or whether, it is written.

use crate::error::Result;
use core::fmt;
use std::io::Write;

/// The status value recorded when a calculation completes.
pub const STATUS_OK: &str = "Ok";

/// A value recorded in a `Trace`.
#[derive(Clone, Debug, PartialEq)]
pub enum TraceValue {
    /// A real number, e.g. an angle in radians or a distance in kilometres.
    Number(f64),
    /// A count, e.g. a number of iterations.
    Count(u32),
    /// Text, e.g. a model name or a formatted result.
    Text(String),
}

impl From<f64> for TraceValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<u32> for TraceValue {
    fn from(value: u32) -> Self {
        Self::Count(value)
    }
}

impl From<&str> for TraceValue {
    fn from(value: &str) -> Self {
        Self::Text(String::from(value))
    }
}

impl From<String> for TraceValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl fmt::Display for TraceValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Count(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

/// An ordered record of named values.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Trace {
    entries: Vec<(String, TraceValue)>,
}

impl Trace {
    /// Construct an empty `Trace`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Record a value at the end of the `Trace`.
    /// * `key` - the name of the value.
    /// * `value` - the value.
    pub fn record(&mut self, key: impl Into<String>, value: impl Into<TraceValue>) -> &mut Self {
        self.entries.push((key.into(), value.into()));
        self
    }

    /// Append all the entries of another `Trace`, preserving their order.
    pub fn append(&mut self, mut other: Self) -> &mut Self {
        self.entries.append(&mut other.entries);
        self
    }

    /// The first value recorded with `key`, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&TraceValue> {
        self.entries
            .iter()
            .find_map(|(k, value)| (k == key).then_some(value))
    }

    /// The first number recorded with `key`, if any.
    #[must_use]
    pub fn number(&self, key: &str) -> Option<f64> {
        match self.get(key) {
            Some(TraceValue::Number(value)) => Some(*value),
            _ => None,
        }
    }

    /// The entries in the order they were recorded.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TraceValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// The number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the `Trace` has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write the `Trace` as `key: value` lines.
    /// * `writer` - the destination.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if writing fails.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        write!(writer, "{self}")?;
        writer.flush()?;
        Ok(())
    }
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in &self.entries {
            writeln!(f, "{key}: {value}")?;
        }
        Ok(())
    }
}

/// The name of the trace file for a calculation between two named
/// positions: `{from}2{to}.log`.
///
/// # Examples
/// ```
/// use geocalc::trace::trace_file_name;
///
/// assert_eq!("Home2Office.log", trace_file_name("Home", "Office"));
/// ```
#[must_use]
pub fn trace_file_name(from: &str, to: &str) -> String {
    format!("{from}2{to}.log")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_record_and_get() {
        let mut trace = Trace::new();
        assert!(trace.is_empty());

        trace
            .record("model", "WGS-84")
            .record("iterations", 4_u32)
            .record("distance_km", 47.5);
        assert_eq!(3, trace.len());

        assert_eq!(Some(&TraceValue::from("WGS-84")), trace.get("model"));
        assert_eq!(Some(&TraceValue::Count(4)), trace.get("iterations"));
        assert_eq!(Some(47.5), trace.number("distance_km"));
        assert_eq!(None, trace.number("model"));
        assert_eq!(None, trace.get("bearing"));
    }

    #[test]
    fn test_trace_order() {
        let mut first = Trace::new();
        first.record("b", 2.0).record("a", 1.0);
        let mut second = Trace::new();
        second.record("c", String::from("three"));

        first.append(second);
        let keys: Vec<&str> = first.iter().map(|(key, _)| key).collect();
        assert_eq!(vec!["b", "a", "c"], keys);
    }

    #[test]
    fn test_trace_display() {
        let mut trace = Trace::new();
        trace
            .record("model", "Sphere")
            .record("gc.iterations", 1_u32)
            .record("gc.distance_km", 0.5)
            .record("gc", STATUS_OK);
        assert_eq!(
            "model: Sphere\ngc.iterations: 1\ngc.distance_km: 0.5\ngc: Ok\n",
            trace.to_string()
        );
    }

    #[test]
    fn test_trace_write_to() {
        let mut trace = Trace::new();
        trace.record("rhumb.dist", "29.61 miles");

        let mut buffer = Vec::new();
        trace.write_to(&mut buffer).unwrap();
        assert_eq!(b"rhumb.dist: 29.61 miles\n".as_slice(), buffer.as_slice());
    }
}
