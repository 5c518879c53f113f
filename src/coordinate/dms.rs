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

//! Degrees, minutes and seconds.
//!
//! Positions are often written as whitespace separated degrees, minutes and
//! seconds with a hemisphere letter, e.g. `"45 32 10 N"`, `"122 48.5 W"`.

use crate::error::{Error, Result};
use angle_sc::Degrees;

/// The hemisphere letters that negate a value.
const NEGATIVE_HEMISPHERES: [char; 2] = ['S', 'W'];
/// The hemisphere letters that may end a value.
const HEMISPHERES: [char; 4] = ['N', 'E', 'S', 'W'];

/// Convert degrees, minutes and seconds to decimal degrees.
///
/// Minutes and seconds are added in the direction of the sign of `degrees`.
/// * `degrees` - the whole or fractional degrees.
/// * `minutes` - the minutes of arc.
/// * `seconds` - the seconds of arc.
///
/// # Examples
/// ```
/// use geocalc::coordinate::dms::dms_to_decimal;
///
/// assert_eq!(45.5, dms_to_decimal(45.0, 30.0, 0.0));
/// assert_eq!(-45.5, dms_to_decimal(-45.0, 30.0, 0.0));
/// ```
#[must_use]
pub fn dms_to_decimal(degrees: f64, minutes: f64, seconds: f64) -> f64 {
    if degrees >= 0.0 {
        degrees + minutes / 60.0 + seconds / 3600.0
    } else {
        degrees - minutes / 60.0 - seconds / 3600.0
    }
}

/// Parse degrees, minutes and seconds text with an optional hemisphere letter.
///
/// The text may end with one of `N`, `E`, `S` or `W`, `S` and `W` give a
/// negative result. The remaining text holds one to three whitespace
/// separated numbers: degrees, minutes and seconds. Missing minutes and
/// seconds are zero, so plain decimal degrees are also accepted.
/// * `text` - the text to parse.
///
/// # Errors
///
/// Returns `Error::Parse` if the text is empty, holds more than three
/// fields or a field is not a number.
///
/// # Examples
/// ```
/// use geocalc::coordinate::dms::parse_degrees;
///
/// assert_eq!(45.5, parse_degrees("45 30 N").unwrap().0);
/// assert_eq!(-122.25, parse_degrees("122 15 W").unwrap().0);
/// assert_eq!(-33.75, parse_degrees("-33.75").unwrap().0);
/// ```
pub fn parse_degrees(text: &str) -> Result<Degrees> {
    let text = text.trim();
    let Some(last) = text.chars().last() else {
        return Err(Error::Parse(String::from("no input")));
    };

    let hemisphere = last.to_ascii_uppercase();
    let (fields, negate) = if HEMISPHERES.contains(&hemisphere) {
        (
            &text[..text.len() - last.len_utf8()],
            NEGATIVE_HEMISPHERES.contains(&hemisphere),
        )
    } else {
        (text, false)
    };

    let mut values = [0.0; 3];
    let mut count = 0;
    for field in fields.split_whitespace() {
        if count == values.len() {
            return Err(Error::Parse(format!("{text:?} has too many fields")));
        }
        values[count] = field
            .parse::<f64>()
            .map_err(|_| Error::Parse(format!("{field:?} in {text:?} is not a number")))?;
        count += 1;
    }
    if count == 0 {
        return Err(Error::Parse(format!("{text:?} has no degrees")));
    }

    let decimal = dms_to_decimal(values[0], values[1], values[2]);
    if !decimal.is_finite() {
        return Err(Error::Parse(format!("{text:?} is not finite")));
    }

    Ok(Degrees(if negate { -libm::fabs(decimal) } else { decimal }))
}
