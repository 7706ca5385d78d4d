// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Floating point precision of the triangulation buffers

use std::fmt::{Debug, Display};

/// Scalar type stored in point and hole buffers.
///
/// Implemented for `f32` and `f64`. All geometric predicates run in `f64`;
/// the buffer precision only affects storage and what callers read back.
pub trait Real:
    Copy + Default + PartialOrd + Debug + Display + Send + Sync + Into<f64> + 'static
{
    /// Convert from double precision, rounding if needed
    fn from_f64(value: f64) -> Self;

    /// Convert to double precision
    fn to_f64(self) -> f64 {
        self.into()
    }
}

impl Real for f32 {
    fn from_f64(value: f64) -> Self {
        value as f32
    }
}

impl Real for f64 {
    fn from_f64(value: f64) -> Self {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_precision_round_trip() {
        let value = f32::from_f64(0.25);
        assert_eq!(value, 0.25f32);
        assert_eq!(value.to_f64(), 0.25);
    }

    #[test]
    fn test_double_precision_is_identity() {
        assert_eq!(f64::from_f64(1.0e-12), 1.0e-12);
    }
}
