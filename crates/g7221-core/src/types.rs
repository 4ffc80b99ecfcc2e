//! Core types for the quantization engine
//!
//! This module defines the quantization categories, the numeric
//! representation selector and the engine configuration shared by the
//! encoder and decoder.

use crate::error::{CodecError, Result};
use crate::g7221::tables::{
    EXPECTED_BITS, G722_1C_REGIONS, G722_1_REGIONS, MAX_BIN, MAX_REGIONS, NUMBER_OF_VECTORS,
    NUM_CATEGORIES, REGION_SIZE, VECTOR_DIMENSION,
};
use std::fmt;

/// A quantization symbol
///
/// For scalar categories this is a signed bin index, for vector categories a
/// codebook index. Symbols are the only values handed to the bitstream layer.
pub type Symbol = i32;

/// Numeric representation used by tables and arithmetic
///
/// Fixed-point results are not bit-identical to floating-point results, so an
/// encoder and a decoder must agree on the mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArithmeticMode {
    /// IEEE double precision tables and arithmetic
    FloatingPoint,
    /// 16-bit scaled integer tables with integer arithmetic
    FixedPoint,
}

impl ArithmeticMode {
    /// Mode selected at build time by the `fixed-point` feature
    pub const fn build_default() -> Self {
        if cfg!(feature = "fixed-point") {
            Self::FixedPoint
        } else {
            Self::FloatingPoint
        }
    }

    /// Short name used in logs
    pub fn name(self) -> &'static str {
        match self {
            Self::FloatingPoint => "float",
            Self::FixedPoint => "fixed",
        }
    }
}

impl Default for ArithmeticMode {
    fn default() -> Self {
        Self::build_default()
    }
}

impl fmt::Display for ArithmeticMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// How a category turns coefficients into symbols
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Coding {
    /// One signed dead-zone bin per coefficient
    Scalar,
    /// One codebook index per group of `vector_dimension` coefficients
    Vector,
    /// Nothing is coded; the region reconstructs to silence
    Fallback,
}

/// One of the eight quantization categories
///
/// Lower indices are finer and cost more bits per coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Category(u8);

impl Category {
    /// Finest, most expensive category
    pub const FINEST: Category = Category(0);

    /// Cheapest category that still codes coefficients
    pub const CHEAPEST_CODED: Category = Category(6);

    /// Fallback category used when the budget runs out
    pub const FALLBACK: Category = Category(7);

    /// All categories from finest to fallback
    pub const ALL: [Category; NUM_CATEGORIES] = [
        Category(0),
        Category(1),
        Category(2),
        Category(3),
        Category(4),
        Category(5),
        Category(6),
        Category(7),
    ];

    /// Create a category from its index
    pub fn new(index: usize) -> Option<Self> {
        (index < NUM_CATEGORIES).then(|| Self(index as u8))
    }

    /// Category index (0..=7)
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Coefficients per quantization symbol
    pub fn vector_dimension(self) -> usize {
        VECTOR_DIMENSION[self.index()]
    }

    /// Codebook size per vector group
    pub fn vector_count(self) -> usize {
        NUMBER_OF_VECTORS[self.index()]
    }

    /// Largest scalar bin index
    pub fn max_bin(self) -> i32 {
        MAX_BIN[self.index()]
    }

    /// Bits spent on one region at this category
    pub fn expected_bits(self) -> u32 {
        EXPECTED_BITS[self.index()]
    }

    /// Coding kind of this category
    pub fn coding(self) -> Coding {
        match self.0 {
            0..=2 => Coding::Scalar,
            3..=6 => Coding::Vector,
            _ => Coding::Fallback,
        }
    }

    /// Number of symbols produced for a region of `len` coefficients
    pub fn expected_symbols(self, len: usize) -> usize {
        match self.coding() {
            Coding::Scalar => len,
            Coding::Vector => len / self.vector_dimension(),
            Coding::Fallback => 0,
        }
    }

    /// Inclusive range of valid symbol values
    pub fn symbol_range(self) -> (Symbol, Symbol) {
        match self.coding() {
            Coding::Scalar => (-self.max_bin(), self.max_bin()),
            Coding::Vector => (0, self.vector_count() as Symbol - 1),
            Coding::Fallback => (0, 0),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "category {}", self.0)
    }
}

/// Quantization engine configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantizerConfig {
    /// Number of spectral regions per block
    pub regions: usize,
    /// Numeric representation
    pub arithmetic: ArithmeticMode,
}

impl QuantizerConfig {
    /// Create a configuration with the build-default arithmetic
    pub fn new(regions: usize) -> Self {
        Self {
            regions,
            arithmetic: ArithmeticMode::build_default(),
        }
    }

    /// Create G.722.1 (7 kHz, 14 regions) configuration
    pub fn g722_1() -> Self {
        Self::new(G722_1_REGIONS)
    }

    /// Create G.722.1 Annex C (14 kHz, 28 regions) configuration
    pub fn g722_1_annex_c() -> Self {
        Self::new(G722_1C_REGIONS)
    }

    /// Set region count
    pub fn with_regions(mut self, regions: usize) -> Self {
        self.regions = regions;
        self
    }

    /// Set arithmetic mode
    pub fn with_arithmetic(mut self, arithmetic: ArithmeticMode) -> Self {
        self.arithmetic = arithmetic;
        self
    }

    /// Coefficients in one block
    pub fn block_size(&self) -> usize {
        self.regions * REGION_SIZE
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.regions == 0 || self.regions > MAX_REGIONS {
            return Err(CodecError::invalid_config(format!(
                "region count {} outside 1..={}",
                self.regions, MAX_REGIONS
            )));
        }

        Ok(())
    }
}

impl Default for QuantizerConfig {
    fn default() -> Self {
        Self::g722_1()
    }
}
