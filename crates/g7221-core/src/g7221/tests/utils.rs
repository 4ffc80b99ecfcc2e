//! Shared helpers for the G.722.1 tests

use crate::g7221::codec::{BlockDecoder, BlockEncoder};
use crate::g7221::numeric::{FixedTables, FloatTables};
use crate::types::{ArithmeticMode, QuantizerConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seed used by every randomized block test
pub const TEST_SEED: u64 = 0x0722_0001;

/// Budget generous enough for category 0 in every region of a 28-region block
pub const RICH_BUDGET: u32 = 2000;

/// Floating-point G.722.1 configuration
pub fn float_config() -> QuantizerConfig {
    QuantizerConfig::g722_1().with_arithmetic(ArithmeticMode::FloatingPoint)
}

/// Fixed-point G.722.1 configuration
pub fn fixed_config() -> QuantizerConfig {
    QuantizerConfig::g722_1().with_arithmetic(ArithmeticMode::FixedPoint)
}

/// Floating-point encoder/decoder pair
pub fn float_pair(config: QuantizerConfig) -> (BlockEncoder<FloatTables>, BlockDecoder<FloatTables>) {
    (
        BlockEncoder::new(config.clone()).unwrap(),
        BlockDecoder::new(config).unwrap(),
    )
}

/// Fixed-point encoder/decoder pair
pub fn fixed_pair(config: QuantizerConfig) -> (BlockEncoder<FixedTables>, BlockDecoder<FixedTables>) {
    (
        BlockEncoder::new(config.clone()).unwrap(),
        BlockDecoder::new(config).unwrap(),
    )
}

/// Seeded generator for synthetic blocks
pub fn test_rng() -> StdRng {
    StdRng::seed_from_u64(TEST_SEED)
}

/// Random floating-point block with coefficients in `-amplitude..amplitude`
pub fn random_float_block(rng: &mut StdRng, len: usize, amplitude: f64) -> Vec<f64> {
    (0..len).map(|_| rng.gen_range(-amplitude..amplitude)).collect()
}

/// Random fixed-point block with coefficients in `-amplitude..=amplitude`
pub fn random_fixed_block(rng: &mut StdRng, len: usize, amplitude: i16) -> Vec<i16> {
    (0..len).map(|_| rng.gen_range(-amplitude..=amplitude)).collect()
}
