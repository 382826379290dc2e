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

//! The error module contains the `Error` type returned by the validating
//! constructors of this library.
//!
//! The numerical routines do not fail: iteration limits and degenerate
//! geometry resolve to a best-effort value instead.

use thiserror::Error;

/// The errors reported when constructing values from caller input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// A caller supplied parameter is outside of its valid range.
    #[error("invalid parameter `{field}`: {reason}")]
    InvalidParameter {
        /// The name of the offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: &'static str,
    },

    /// The least squares solver reported an internal failure.
    #[error("least squares solution failed: {0}")]
    LeastSquares(&'static str),
}

impl Error {
    /// Construct an `InvalidParameter` error.
    /// * `field` - the name of the offending field.
    /// * `reason` - why the value was rejected.
    #[must_use]
    pub const fn invalid(field: &'static str, reason: &'static str) -> Self {
        Self::InvalidParameter { field, reason }
    }

    /// The name of the offending field, if the error is an `InvalidParameter`.
    #[must_use]
    pub const fn field(&self) -> Option<&'static str> {
        match self {
            Self::InvalidParameter { field, .. } => Some(*field),
            Self::LeastSquares(_) => None,
        }
    }
}

/// A `Result` using this library's `Error`.
pub type Result<T> = core::result::Result<T, Error>;

/// Check that a value is a finite number.
/// * `field` - the name of the field.
/// * `value` - the value to check.
pub(crate) const fn check_finite(field: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::invalid(field, "must be a finite number"))
    }
}

/// Check that a value is a finite number greater than zero.
/// * `field` - the name of the field.
/// * `value` - the value to check.
pub(crate) fn check_positive(field: &'static str, value: f64) -> Result<f64> {
    let value = check_finite(field, value)?;
    if 0.0 < value {
        Ok(value)
    } else {
        Err(Error::invalid(field, "must be greater than zero"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_positive() {
        assert_eq!(Ok(1.5), check_positive("radius", 1.5));

        let error = check_positive("radius", 0.0).unwrap_err();
        assert_eq!(Some("radius"), error.field());
        assert_eq!(
            "invalid parameter `radius`: must be greater than zero",
            error.to_string()
        );

        let error = check_positive("width", f64::NAN).unwrap_err();
        assert_eq!(Error::invalid("width", "must be a finite number"), error);
    }

    #[test]
    fn test_least_squares_error() {
        let error = Error::LeastSquares("U not computed");
        assert_eq!(None, error.field());
        assert_eq!(
            "least squares solution failed: U not computed",
            error.to_string()
        );
    }
}
