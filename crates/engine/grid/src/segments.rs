//! Segment-count coercion
//!
//! Segment counts arrive from loosely typed sources (config files, query
//! strings, sliders). They are floored, and anything that floors to zero or
//! is not a finite number becomes a single segment.

use crate::error::{GridError, Result};

/// Normalize a raw segment count into a positive integer
///
/// - `None`, `NaN`, `±∞` and `0` become `1`
/// - fractional values are floored (`0.5` floors to `0`, so it becomes `1`)
/// - values that floor below zero are rejected
pub fn normalize_segment_count(raw: Option<f64>) -> Result<u32> {
    let Some(value) = raw else {
        return Ok(1);
    };
    if !value.is_finite() {
        return Ok(1);
    }

    let floored = value.floor();
    if floored < 0.0 {
        return Err(GridError::NegativeSegmentCount(value));
    }
    if floored == 0.0 {
        return Ok(1);
    }

    Ok(floored.min(u32::MAX as f64) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_and_degenerate_inputs_become_one() {
        assert_eq!(normalize_segment_count(None), Ok(1));
        assert_eq!(normalize_segment_count(Some(0.0)), Ok(1));
        assert_eq!(normalize_segment_count(Some(-0.0)), Ok(1));
        assert_eq!(normalize_segment_count(Some(f64::NAN)), Ok(1));
        assert_eq!(normalize_segment_count(Some(f64::INFINITY)), Ok(1));
        assert_eq!(normalize_segment_count(Some(f64::NEG_INFINITY)), Ok(1));
        assert_eq!(normalize_segment_count(Some(0.75)), Ok(1));
    }

    #[test]
    fn test_fractional_counts_are_floored() {
        assert_eq!(normalize_segment_count(Some(10.0)), Ok(10));
        assert_eq!(normalize_segment_count(Some(10.9)), Ok(10));
        assert_eq!(normalize_segment_count(Some(1.0)), Ok(1));
    }

    #[test]
    fn test_negative_counts_are_rejected() {
        assert_eq!(
            normalize_segment_count(Some(-3.0)),
            Err(GridError::NegativeSegmentCount(-3.0))
        );
        // -0.5 floors to -1
        assert!(normalize_segment_count(Some(-0.5)).is_err());
    }

    #[test]
    fn test_huge_counts_saturate() {
        assert_eq!(normalize_segment_count(Some(1e20)), Ok(u32::MAX));
    }
}
