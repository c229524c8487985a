use std::fmt::Debug;

use crate::error::{AnalysisError, Result};

/// Verify that every value in a batch equals the first and return the common
/// value.
///
/// Lags expressed in seconds are only meaningful when all audio streams share
/// a sampling clock, and frame-accurate trimming needs one frame rate, so
/// this gate runs on both rate lists before any correlation work. A mismatch
/// is a hard failure, never a warning.
pub fn check_equal<T>(values: &[T]) -> Result<T>
where
    T: PartialEq + Copy + Debug,
{
    let first = *values.first().ok_or(AnalysisError::EmptyBatch)?;

    if values.iter().any(|v| *v != first) {
        return Err(AnalysisError::InconsistentRates {
            rates: format!("{values:?}"),
        }
        .into());
    }

    Ok(first)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SyncError;

    #[test]
    fn test_equal_rates_return_common_value() {
        assert_eq!(check_equal(&[44100u32, 44100, 44100]).unwrap(), 44100);
        assert_eq!(check_equal(&[29.97f64]).unwrap(), 29.97);
    }

    #[test]
    fn test_mismatched_rates_fail() {
        let result = check_equal(&[44100u32, 48000]);
        assert!(matches!(
            result,
            Err(SyncError::Analysis(AnalysisError::InconsistentRates { .. }))
        ));
    }

    #[test]
    fn test_empty_batch_fails() {
        let result = check_equal::<u32>(&[]);
        assert!(matches!(
            result,
            Err(SyncError::Analysis(AnalysisError::EmptyBatch))
        ));
    }
}
