//! G.722.1 Block Quantization
//!
//! This module ties the estimator, allocator and quantizer together into the
//! per-block encode and decode paths. A block is `regions * REGION_SIZE`
//! transform coefficients.
//!
//! Encode: validate → estimate power buckets → allocate categories →
//! normalize each region → quantize.
//!
//! Decode: check side information → recompute the allocation from the
//! transmitted buckets and budget → dequantize → denormalize.

use crate::error::{CodecError, Result};
use crate::g7221::allocation::allocate;
use crate::g7221::numeric::{DefaultTables, TableSet};
use crate::g7221::power::estimate_block;
use crate::g7221::quantizer::{dequantize, quantize};
use crate::g7221::tables::REGION_SIZE;
use crate::types::{ArithmeticMode, Category, QuantizerConfig, Symbol};
use crate::utils::validation::{validate_block, validate_buckets};
use rayon::prelude::*;

/// Quantized representation of one block
///
/// `buckets`, `categories` and `bit_budget` are the side information; the
/// bitstream packer transmits them together with `symbols`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedBlock {
    /// Numeric representation the block was produced with
    pub mode: ArithmeticMode,
    /// Bit budget the allocation was computed for
    pub bit_budget: u32,
    /// Power bucket per region
    pub buckets: Vec<u8>,
    /// Category per region
    pub categories: Vec<Category>,
    /// Quantization symbols per region
    pub symbols: Vec<Vec<Symbol>>,
    /// Bits consumed by the allocation
    pub bits_used: u32,
}

impl EncodedBlock {
    /// Number of regions in the block
    pub fn regions(&self) -> usize {
        self.buckets.len()
    }

    /// Total number of symbols across all regions
    pub fn symbol_count(&self) -> usize {
        self.symbols.iter().map(Vec::len).sum()
    }
}

fn check_mode<T: TableSet>(mode: ArithmeticMode) -> Result<()> {
    if mode != T::MODE {
        return Err(CodecError::ArithmeticMismatch {
            expected: T::MODE,
            actual: mode,
        });
    }
    Ok(())
}

/// Block encoder over one numeric representation
///
/// # Example
/// ```
/// use g7221_core::{BlockEncoder, BlockDecoder, FloatTables, QuantizerConfig};
/// use g7221_core::types::ArithmeticMode;
///
/// let config = QuantizerConfig::g722_1().with_arithmetic(ArithmeticMode::FloatingPoint);
/// let encoder = BlockEncoder::<FloatTables>::new(config.clone()).unwrap();
/// let decoder = BlockDecoder::<FloatTables>::new(config).unwrap();
///
/// let block = vec![0.0f64; 280];
/// let encoded = encoder.encode(&block, 480).unwrap();
/// let decoded = decoder.decode(&encoded).unwrap();
/// assert_eq!(decoded.len(), 280);
/// ```
#[derive(Debug, Clone)]
pub struct BlockEncoder<T: TableSet = DefaultTables> {
    config: QuantizerConfig,
    tables: &'static T,
}

impl<T: TableSet> BlockEncoder<T> {
    /// Create an encoder from configuration
    ///
    /// The configured arithmetic mode must match the table set.
    pub fn new(config: QuantizerConfig) -> Result<Self> {
        config.validate()?;
        check_mode::<T>(config.arithmetic)?;
        tracing::debug!(
            "Block encoder: {} regions, {} arithmetic",
            config.regions,
            config.arithmetic
        );
        Ok(Self {
            config,
            tables: T::shared(),
        })
    }

    /// Engine configuration
    pub fn config(&self) -> &QuantizerConfig {
        &self.config
    }

    /// Encode one block under `bit_budget`
    ///
    /// # Errors
    ///
    /// Returns an error if the block has the wrong length or contains
    /// non-finite coefficients.
    pub fn encode(&self, coefficients: &[T::Coefficient], bit_budget: u32) -> Result<EncodedBlock> {
        validate_block(self.tables, coefficients, self.config.block_size())?;

        let powers = estimate_block(self.tables, coefficients, REGION_SIZE);
        let buckets: Vec<usize> = powers.iter().map(|p| p.bucket).collect();
        let allocation = allocate(&buckets, bit_budget);

        let mut normalized = vec![T::Normalized::default(); REGION_SIZE];
        let mut symbols = Vec::with_capacity(self.config.regions);
        for (region, (&bucket, &category)) in coefficients
            .chunks_exact(REGION_SIZE)
            .zip(buckets.iter().zip(&allocation.categories))
        {
            for (x, &c) in normalized.iter_mut().zip(region) {
                *x = self.tables.normalize(c, bucket);
            }
            symbols.push(quantize(self.tables, &normalized, category)?);
        }

        tracing::trace!(
            "encoded block: buckets {:?}, categories {:?}",
            buckets,
            allocation.categories
        );

        Ok(EncodedBlock {
            mode: T::MODE,
            bit_budget,
            buckets: buckets.iter().map(|&b| b as u8).collect(),
            categories: allocation.categories,
            symbols,
            bits_used: allocation.bits_used,
        })
    }

    /// Encode independent blocks in parallel, results in input order
    pub fn encode_blocks<B>(&self, blocks: &[B], bit_budget: u32) -> Result<Vec<EncodedBlock>>
    where
        B: AsRef<[T::Coefficient]> + Sync,
    {
        blocks
            .par_iter()
            .map(|block| self.encode(block.as_ref(), bit_budget))
            .collect()
    }
}

/// Block decoder over one numeric representation
#[derive(Debug, Clone)]
pub struct BlockDecoder<T: TableSet = DefaultTables> {
    config: QuantizerConfig,
    tables: &'static T,
}

impl<T: TableSet> BlockDecoder<T> {
    /// Create a decoder from configuration
    ///
    /// The configured arithmetic mode must match the table set.
    pub fn new(config: QuantizerConfig) -> Result<Self> {
        config.validate()?;
        check_mode::<T>(config.arithmetic)?;
        tracing::debug!(
            "Block decoder: {} regions, {} arithmetic",
            config.regions,
            config.arithmetic
        );
        Ok(Self {
            config,
            tables: T::shared(),
        })
    }

    /// Engine configuration
    pub fn config(&self) -> &QuantizerConfig {
        &self.config
    }

    /// Decode one block
    ///
    /// # Errors
    ///
    /// Fails the whole block on a mode mismatch, inconsistent side
    /// information, or any out-of-range symbol.
    pub fn decode(&self, block: &EncodedBlock) -> Result<Vec<T::Coefficient>> {
        check_mode::<T>(block.mode)?;
        validate_buckets(&block.buckets, self.config.regions)?;
        if block.categories.len() != self.config.regions
            || block.symbols.len() != self.config.regions
        {
            return Err(CodecError::invalid_side_info(format!(
                "expected {} regions, got {} categories and {} symbol groups",
                self.config.regions,
                block.categories.len(),
                block.symbols.len()
            )));
        }

        let buckets: Vec<usize> = block.buckets.iter().map(|&b| usize::from(b)).collect();
        let allocation = allocate(&buckets, block.bit_budget);
        if let Some((region, (&transmitted, &recomputed))) = block
            .categories
            .iter()
            .zip(&allocation.categories)
            .enumerate()
            .find(|(_, (t, r))| t != r)
        {
            return Err(CodecError::CategoryMismatch {
                region,
                transmitted,
                recomputed,
            });
        }

        let mut output = vec![T::Coefficient::default(); self.config.block_size()];
        let mut normalized = vec![T::Normalized::default(); REGION_SIZE];
        for (region, out) in output.chunks_exact_mut(REGION_SIZE).enumerate() {
            let category = allocation.categories[region];
            dequantize(self.tables, &block.symbols[region], category, &mut normalized)
                .map_err(|e| e.in_region(region))?;
            for (c, &x) in out.iter_mut().zip(&normalized) {
                *c = self.tables.denormalize(x, buckets[region]);
            }
        }

        Ok(output)
    }

    /// Decode independent blocks in parallel, results in input order
    pub fn decode_blocks(&self, blocks: &[EncodedBlock]) -> Result<Vec<Vec<T::Coefficient>>> {
        blocks.par_iter().map(|block| self.decode(block)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::g7221::numeric::{FixedTables, FloatTables};

    fn float_config() -> QuantizerConfig {
        QuantizerConfig::g722_1().with_arithmetic(ArithmeticMode::FloatingPoint)
    }

    fn fixed_config() -> QuantizerConfig {
        QuantizerConfig::g722_1().with_arithmetic(ArithmeticMode::FixedPoint)
    }

    #[test]
    fn test_mode_must_match_tables() {
        assert!(BlockEncoder::<FloatTables>::new(float_config()).is_ok());
        let err = BlockEncoder::<FloatTables>::new(fixed_config()).unwrap_err();
        assert!(matches!(err, CodecError::ArithmeticMismatch { .. }));
        assert!(BlockDecoder::<FixedTables>::new(float_config()).is_err());
    }

    #[test]
    fn test_wrong_block_length() {
        let encoder = BlockEncoder::<FloatTables>::new(float_config()).unwrap();
        let err = encoder.encode(&[0.0; 100], 480).unwrap_err();
        assert_eq!(
            err,
            CodecError::InvalidFrameSize {
                expected: 280,
                actual: 100
            }
        );
    }

    #[test]
    fn test_silence_round_trip() {
        let encoder = BlockEncoder::<FloatTables>::new(float_config()).unwrap();
        let decoder = BlockDecoder::<FloatTables>::new(float_config()).unwrap();
        let encoded = encoder.encode(&[0.0; 280], 480).unwrap();
        assert!(encoded.buckets.iter().all(|&b| b == 0));
        let decoded = decoder.decode(&encoded).unwrap();
        assert!(decoded.iter().all(|&c| c == 0.0));
    }

    #[test]
    fn test_decoder_rejects_other_mode() {
        let encoder = BlockEncoder::<FixedTables>::new(fixed_config()).unwrap();
        let decoder = BlockDecoder::<FloatTables>::new(float_config()).unwrap();
        let encoded = encoder.encode(&[0i16; 280], 480).unwrap();
        assert!(matches!(
            decoder.decode(&encoded),
            Err(CodecError::ArithmeticMismatch { .. })
        ));
    }

    #[test]
    fn test_malformed_symbol_reports_region() {
        let encoder = BlockEncoder::<FloatTables>::new(float_config()).unwrap();
        let decoder = BlockDecoder::<FloatTables>::new(float_config()).unwrap();
        let mut encoded = encoder.encode(&[1.0; 280], 2000).unwrap();
        assert_eq!(encoded.categories[3], Category::FINEST);
        encoded.symbols[3][0] = 99;
        let err = decoder.decode(&encoded).unwrap_err();
        assert!(matches!(err, CodecError::MalformedSymbol { region: 3, symbol: 99, .. }));
    }

    #[test]
    fn test_tampered_category_detected() {
        let encoder = BlockEncoder::<FloatTables>::new(float_config()).unwrap();
        let decoder = BlockDecoder::<FloatTables>::new(float_config()).unwrap();
        let mut encoded = encoder.encode(&[1.0; 280], 480).unwrap();
        encoded.categories[0] = Category::FALLBACK;
        assert!(matches!(
            decoder.decode(&encoded),
            Err(CodecError::CategoryMismatch { region: 0, .. })
        ));
    }
}
