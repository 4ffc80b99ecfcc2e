//! Input validation utilities for engine operations

use crate::error::{CodecError, Result};
use crate::g7221::numeric::TableSet;
use crate::g7221::power::MAX_BUCKET;

/// Validate a block of raw coefficients before classification
///
/// Non-finite coefficients are rejected here: letting them reach the power
/// estimator would break the bucket agreement between encoder and decoder.
pub fn validate_block<T: TableSet>(
    tables: &T,
    coefficients: &[T::Coefficient],
    expected_len: usize,
) -> Result<()> {
    if coefficients.len() != expected_len {
        return Err(CodecError::InvalidFrameSize {
            expected: expected_len,
            actual: coefficients.len(),
        });
    }

    if let Some(index) = coefficients.iter().position(|&c| !tables.is_finite(c)) {
        return Err(CodecError::invalid_input(
            index,
            format!("non-finite coefficient {:?}", coefficients[index]),
        ));
    }

    Ok(())
}

/// Validate transmitted power buckets
pub fn validate_buckets(buckets: &[u8], regions: usize) -> Result<()> {
    if buckets.len() != regions {
        return Err(CodecError::invalid_side_info(format!(
            "expected {} power buckets, got {}",
            regions,
            buckets.len()
        )));
    }

    if let Some((region, &bucket)) = buckets
        .iter()
        .enumerate()
        .find(|(_, &b)| usize::from(b) > MAX_BUCKET)
    {
        return Err(CodecError::invalid_side_info(format!(
            "power bucket {} of region {} exceeds {}",
            bucket, region, MAX_BUCKET
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::g7221::numeric::{fixed_tables, float_tables};

    #[test]
    fn test_validate_block_length() {
        let err = validate_block(float_tables(), &[0.0; 10], 20).unwrap_err();
        assert_eq!(
            err,
            CodecError::InvalidFrameSize {
                expected: 20,
                actual: 10
            }
        );
    }

    #[test]
    fn test_validate_block_rejects_non_finite() {
        let mut block = vec![0.0; 20];
        block[7] = f64::NAN;
        let err = validate_block(float_tables(), &block, 20).unwrap_err();
        assert!(matches!(err, CodecError::InvalidInput { index: 7, .. }));

        block[7] = f64::NEG_INFINITY;
        assert!(validate_block(float_tables(), &block, 20).is_err());

        assert!(validate_block(fixed_tables(), &[i16::MIN; 20], 20).is_ok());
    }

    #[test]
    fn test_validate_buckets() {
        assert!(validate_buckets(&[0, 63, 10], 3).is_ok());
        assert!(matches!(
            validate_buckets(&[0, 64, 10], 3),
            Err(CodecError::InvalidSideInfo { .. })
        ));
        assert!(validate_buckets(&[0, 1], 3).is_err());
    }
}
