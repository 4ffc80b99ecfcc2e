//! Table Set and Arithmetic Strategies
//!
//! The engine runs in one of two numeric representations: IEEE double
//! precision or 16-bit scaled integers. Both are expressed through the
//! [`TableSet`] trait so the estimator, allocator and quantizer are written
//! once and instantiated per representation.
//!
//! Each implementation is a single immutable, process-wide value. The
//! floating-point set is a plain static; the fixed-point set derives its
//! boundary and dead zone tables once on first use.
//!
//! Fixed-point formats:
//! - standard deviation: Q0, saturated at 32767
//! - standard deviation inverse: Q15, capped at 32767
//! - step size: Q12, step size inverse: Q13, dead zone: Q15
//! - normalized coefficients: Q12 in `i32`
//! - energies and power boundaries: Q24 in `u64`

use crate::g7221::tables::*;
use crate::types::{ArithmeticMode, Category, Symbol};
use once_cell::sync::Lazy;
use std::fmt;

/// Read-only tables plus the arithmetic that goes with them
pub trait TableSet: Send + Sync + fmt::Debug + 'static {
    /// Scalar table entry
    type Value: Copy + PartialOrd + fmt::Debug + Send + Sync;
    /// Raw transform coefficient as delivered by the transform stage
    type Coefficient: Copy + Default + PartialEq + fmt::Debug + Send + Sync;
    /// Coefficient scaled by its region's standard deviation inverse
    type Normalized: Copy + Default + PartialEq + fmt::Debug + Send + Sync;
    /// Region power and squared distances
    type Energy: Copy + PartialOrd + fmt::Debug + Send + Sync;

    /// Representation implemented by this table set
    const MODE: ArithmeticMode;

    /// The process-wide instance
    fn shared() -> &'static Self
    where
        Self: Sized;

    /// Representative standard deviation of a power bucket
    fn standard_deviation(&self, bucket: usize) -> Self::Value;

    /// Multiplicative inverse of [`TableSet::standard_deviation`]
    fn standard_deviation_inverse(&self, bucket: usize) -> Self::Value;

    /// The 63 bucket boundaries, strictly increasing
    fn power_boundaries(&self) -> &[Self::Energy];

    /// Quantizer step size
    fn step_size(&self, category: Category) -> Self::Value;

    /// Reciprocal of the quantizer step size
    fn step_size_inverse(&self, category: Category) -> Self::Value;

    /// Dead zone threshold on normalized magnitude
    fn dead_zone(&self, category: Category) -> Self::Value;

    /// Coefficients per symbol
    fn vector_dimension(&self, category: Category) -> usize {
        category.vector_dimension()
    }

    /// Codebook size per vector group
    fn vector_count(&self, category: Category) -> usize {
        category.vector_count()
    }

    /// Largest scalar bin
    fn max_bin(&self, category: Category) -> i32 {
        category.max_bin()
    }

    /// Whether a raw coefficient is usable
    fn is_finite(&self, coefficient: Self::Coefficient) -> bool;

    /// Mean square of a region's coefficients
    fn region_energy(&self, coefficients: &[Self::Coefficient]) -> Self::Energy;

    /// Scale a raw coefficient by the bucket's standard deviation inverse
    fn normalize(&self, coefficient: Self::Coefficient, bucket: usize) -> Self::Normalized;

    /// Scale a normalized value back by the bucket's standard deviation
    fn denormalize(&self, value: Self::Normalized, bucket: usize) -> Self::Coefficient;

    /// Whether a normalized value falls inside the category's dead zone
    fn below_dead_zone(&self, value: Self::Normalized, category: Category) -> bool;

    /// Signed scalar bin of a normalized value, zero inside the dead zone
    fn scalar_bin(&self, value: Self::Normalized, category: Category) -> Symbol;

    /// Reconstruction level of a signed bin
    fn reconstruct(&self, bin: Symbol, category: Category) -> Self::Normalized;

    /// Squared Euclidean distance between values and a bin-level codebook entry
    fn distance(&self, values: &[Self::Normalized], entry: &[i8], category: Category) -> Self::Energy;
}

/// Floating-point tables (ground truth)
#[derive(Debug, Clone)]
pub struct FloatTables {
    _private: (),
}

static FLOAT_TABLES: FloatTables = FloatTables { _private: () };

impl TableSet for FloatTables {
    type Value = f64;
    type Coefficient = f64;
    type Normalized = f64;
    type Energy = f64;

    const MODE: ArithmeticMode = ArithmeticMode::FloatingPoint;

    fn shared() -> &'static Self {
        &FLOAT_TABLES
    }

    fn standard_deviation(&self, bucket: usize) -> f64 {
        REGION_STANDARD_DEVIATION[bucket]
    }

    fn standard_deviation_inverse(&self, bucket: usize) -> f64 {
        STANDARD_DEVIATION_INVERSE[bucket]
    }

    fn power_boundaries(&self) -> &[f64] {
        &REGION_POWER_BOUNDARY
    }

    fn step_size(&self, category: Category) -> f64 {
        STEP_SIZE[category.index()]
    }

    fn step_size_inverse(&self, category: Category) -> f64 {
        STEP_SIZE_INVERSE[category.index()]
    }

    fn dead_zone(&self, category: Category) -> f64 {
        DEAD_ZONE[category.index()]
    }

    fn is_finite(&self, coefficient: f64) -> bool {
        coefficient.is_finite()
    }

    fn region_energy(&self, coefficients: &[f64]) -> f64 {
        if coefficients.is_empty() {
            return 0.0;
        }
        let sum: f64 = coefficients.iter().map(|c| c * c).sum();
        sum / coefficients.len() as f64
    }

    fn normalize(&self, coefficient: f64, bucket: usize) -> f64 {
        coefficient * STANDARD_DEVIATION_INVERSE[bucket]
    }

    fn denormalize(&self, value: f64, bucket: usize) -> f64 {
        value * REGION_STANDARD_DEVIATION[bucket]
    }

    fn below_dead_zone(&self, value: f64, category: Category) -> bool {
        value.abs() < DEAD_ZONE[category.index()]
    }

    fn scalar_bin(&self, value: f64, category: Category) -> Symbol {
        if self.below_dead_zone(value, category) {
            return 0;
        }
        let scaled = (value.abs() * STEP_SIZE_INVERSE[category.index()] + 0.5).floor();
        let magnitude = (scaled as Symbol).min(category.max_bin());
        if value < 0.0 {
            -magnitude
        } else {
            magnitude
        }
    }

    fn reconstruct(&self, bin: Symbol, category: Category) -> f64 {
        if bin == 0 {
            return 0.0;
        }
        f64::from(bin) * STEP_SIZE[category.index()]
    }

    fn distance(&self, values: &[f64], entry: &[i8], category: Category) -> f64 {
        values
            .iter()
            .zip(entry)
            .map(|(&x, &bin)| {
                let d = x - self.reconstruct(Symbol::from(bin), category);
                d * d
            })
            .sum()
    }
}

/// Fixed-point tables (16-bit scaled integers)
#[derive(Debug, Clone)]
pub struct FixedTables {
    power_boundaries: [u64; REGION_POWER_TABLE_SIZE - 1],
    dead_zone: [i32; NUM_CATEGORIES],
}

impl FixedTables {
    /// Fractional bits of the standard deviation table
    pub const STANDARD_DEVIATION_SHIFT: u32 = 0;
    /// Fractional bits of the standard deviation inverse table
    pub const STANDARD_DEVIATION_INVERSE_SHIFT: u32 = 15;
    /// Fractional bits of the step size table
    pub const STEP_SIZE_SHIFT: u32 = 12;
    /// Fractional bits of the step size inverse table
    pub const STEP_SIZE_INVERSE_SHIFT: u32 = 13;
    /// Fractional bits of the dead zone table
    pub const DEAD_ZONE_SHIFT: u32 = 15;
    /// Fractional bits of normalized coefficients
    pub const NORMALIZED_SHIFT: u32 = 12;
    /// Fractional bits of energies and boundaries
    pub const ENERGY_SHIFT: u32 = FIXED_ENERGY_SHIFT;

    fn build() -> Self {
        let scale = (1u64 << FIXED_ENERGY_SHIFT) as f64;
        let mut power_boundaries = [0u64; REGION_POWER_TABLE_SIZE - 1];
        for (fixed, &boundary) in power_boundaries.iter_mut().zip(REGION_POWER_BOUNDARY.iter()) {
            *fixed = (boundary * scale).round() as u64;
        }

        let mut dead_zone = [0i32; NUM_CATEGORIES];
        for (i, dz) in dead_zone.iter_mut().enumerate() {
            *dz = (i32::from(FIXED_DEAD_ZONE[i]) << 2) | i32::from(FIXED_DEAD_ZONE_LOW_BITS[i]);
        }

        tracing::debug!("Fixed-point quantization tables built");
        Self {
            power_boundaries,
            dead_zone,
        }
    }
}

static FIXED_TABLES: Lazy<FixedTables> = Lazy::new(FixedTables::build);

fn split_sign(value: i64) -> (bool, i64) {
    (value < 0, value.abs())
}

impl TableSet for FixedTables {
    type Value = i32;
    type Coefficient = i16;
    type Normalized = i32;
    type Energy = u64;

    const MODE: ArithmeticMode = ArithmeticMode::FixedPoint;

    fn shared() -> &'static Self {
        &FIXED_TABLES
    }

    fn standard_deviation(&self, bucket: usize) -> i32 {
        i32::from(FIXED_STANDARD_DEVIATION[bucket])
    }

    fn standard_deviation_inverse(&self, bucket: usize) -> i32 {
        i32::from(FIXED_STANDARD_DEVIATION_INVERSE[bucket])
    }

    fn power_boundaries(&self) -> &[u64] {
        &self.power_boundaries
    }

    fn step_size(&self, category: Category) -> i32 {
        i32::from(FIXED_STEP_SIZE[category.index()])
    }

    fn step_size_inverse(&self, category: Category) -> i32 {
        i32::from(FIXED_STEP_SIZE_INVERSE[category.index()])
    }

    fn dead_zone(&self, category: Category) -> i32 {
        self.dead_zone[category.index()]
    }

    fn is_finite(&self, _coefficient: i16) -> bool {
        true
    }

    fn region_energy(&self, coefficients: &[i16]) -> u64 {
        if coefficients.is_empty() {
            return 0;
        }
        let sum: u128 = coefficients
            .iter()
            .map(|&c| {
                let c = i64::from(c);
                (c * c) as u128
            })
            .sum();
        let energy = (sum << FIXED_ENERGY_SHIFT) / coefficients.len() as u128;
        energy.min(u128::from(u64::MAX)) as u64
    }

    fn normalize(&self, coefficient: i16, bucket: usize) -> i32 {
        let inverse = i64::from(FIXED_STANDARD_DEVIATION_INVERSE[bucket]);
        let (negative, magnitude) = split_sign(i64::from(coefficient));
        // Q0 * Q15 -> Q12
        let scaled = ((magnitude * inverse + 4) >> 3) as i32;
        if negative {
            -scaled
        } else {
            scaled
        }
    }

    fn denormalize(&self, value: i32, bucket: usize) -> i16 {
        let deviation = i64::from(FIXED_STANDARD_DEVIATION[bucket]);
        let (negative, magnitude) = split_sign(i64::from(value));
        // Q12 * Q0 -> Q0
        let scaled = ((magnitude * deviation + 2048) >> 12).min(i64::from(i16::MAX)) as i16;
        if negative {
            -scaled
        } else {
            scaled
        }
    }

    fn below_dead_zone(&self, value: i32, category: Category) -> bool {
        // Q12 -> Q15 before comparing
        (i64::from(value).abs() << 3) < i64::from(self.dead_zone[category.index()])
    }

    fn scalar_bin(&self, value: i32, category: Category) -> Symbol {
        if self.below_dead_zone(value, category) {
            return 0;
        }
        let inverse = i64::from(FIXED_STEP_SIZE_INVERSE[category.index()]);
        let (negative, magnitude) = split_sign(i64::from(value));
        // Q12 * Q13 -> Q25, rounded to the nearest bin
        let bin = ((magnitude * inverse + (1 << 24)) >> 25).min(i64::from(category.max_bin()));
        let bin = bin as Symbol;
        if negative {
            -bin
        } else {
            bin
        }
    }

    fn reconstruct(&self, bin: Symbol, category: Category) -> i32 {
        bin * i32::from(FIXED_STEP_SIZE[category.index()])
    }

    fn distance(&self, values: &[i32], entry: &[i8], category: Category) -> u64 {
        values
            .iter()
            .zip(entry)
            .map(|(&x, &bin)| {
                let d = i64::from(x) - i64::from(self.reconstruct(Symbol::from(bin), category));
                (d * d) as u64
            })
            .sum()
    }
}

/// Table set selected by the `fixed-point` build feature
#[cfg(feature = "fixed-point")]
pub type DefaultTables = FixedTables;

/// Table set selected by the `fixed-point` build feature
#[cfg(not(feature = "fixed-point"))]
pub type DefaultTables = FloatTables;

/// Shared floating-point table set
pub fn float_tables() -> &'static FloatTables {
    FloatTables::shared()
}

/// Shared fixed-point table set
pub fn fixed_tables() -> &'static FixedTables {
    FixedTables::shared()
}

/// Build the derived tables ahead of the first block
pub fn init_tables() {
    Lazy::force(&FIXED_TABLES);
}
