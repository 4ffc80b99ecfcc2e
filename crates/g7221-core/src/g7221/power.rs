//! Region Power Estimation
//!
//! Maps a region's mean-square energy to one of 64 discretized power buckets
//! by binary search over the boundary table, and maps buckets back to their
//! representative standard deviation.
//!
//! Classification must agree bit-exactly between encoder and decoder since
//! the category allocation is recomputed from the buckets on both ends.

use crate::g7221::numeric::TableSet;
use crate::g7221::tables::{REGION_POWER, REGION_POWER_TABLE_SIZE};

/// Highest power bucket index
pub const MAX_BUCKET: usize = REGION_POWER_TABLE_SIZE - 1;

/// Estimated power of one region
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionPower<E> {
    /// Discretized power bucket (0..=63)
    pub bucket: usize,
    /// Mean-square energy the bucket was derived from
    pub energy: E,
}

/// Classify an energy into its power bucket
///
/// Returns the bucket `i` with `boundary[i - 1] <= energy < boundary[i]`.
/// An energy equal to a boundary belongs to the higher bucket. Energies below
/// the first boundary (including zero, negative and NaN) map to bucket 0,
/// energies at or above the last boundary map to bucket 63.
pub fn classify<T: TableSet>(tables: &T, energy: T::Energy) -> usize {
    tables
        .power_boundaries()
        .partition_point(|boundary| *boundary <= energy)
}

/// Estimate the power bucket of a region's coefficients
pub fn estimate<T: TableSet>(tables: &T, coefficients: &[T::Coefficient]) -> RegionPower<T::Energy> {
    let energy = tables.region_energy(coefficients);
    let bucket = classify(tables, energy);
    tracing::trace!("region energy {:?} -> bucket {}", energy, bucket);
    RegionPower { bucket, energy }
}

/// Estimate every region of a block
///
/// `coefficients` is split into consecutive regions of `region_size`.
pub fn estimate_block<T: TableSet>(
    tables: &T,
    coefficients: &[T::Coefficient],
    region_size: usize,
) -> Vec<RegionPower<T::Energy>> {
    coefficients
        .chunks(region_size)
        .map(|region| estimate(tables, region))
        .collect()
}

/// Representative power (mean square) of a bucket, in floating point
pub fn representative_power(bucket: usize) -> f64 {
    REGION_POWER[bucket.min(MAX_BUCKET)]
}
