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

//! The error module contains the `Error` type returned by the fallible
//! functions of the library.

use thiserror::Error;

/// The errors that can occur while reading positions and calculating
/// paths between them.
#[derive(Debug, Error)]
pub enum Error {
    /// Coordinate text is empty, not a number or not finite.
    #[error("invalid coordinate: {0}")]
    Parse(String),

    /// The great circle iteration did not converge.
    /// The positions are antipodal or nearly antipodal.
    #[error("great circle did not converge after {iterations} iterations, nearly antipodal")]
    Convergence {
        /// The number of iterations performed.
        iterations: u32,
    },

    /// A calculation produced a distance or bearing that is not finite.
    #[error("numeric error: {0}")]
    Numeric(&'static str),

    /// Writing a trace failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// The `Result` type of the library.
pub type Result<T> = core::result::Result<T, Error>;
