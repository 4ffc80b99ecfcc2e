//! # G7221-Core: G.722.1 Quantization Engine
//!
//! This library provides the adaptive quantization subsystem of the G.722.1
//! wideband codec family for VoIP applications: it decides, per block of
//! transform coefficients, how coarsely each spectral region is quantized
//! and turns coefficients into quantization symbols and back.
//!
//! ## Features
//!
//! - **Region Power Estimation**: 64 discretized power buckets per region
//! - **Category Allocation**: Deterministic bit allocation across 8 categories
//! - **Scalar and Vector Quantization**: Dead-zone scalar bins and literal codebooks
//! - **Dual Arithmetic**: Floating-point reference and 16-bit fixed-point tables
//!
//! ## Performance
//!
//! - **Lookup Tables**: Pre-computed tables shared process-wide
//! - **Parallel Processing**: Independent blocks encoded and decoded on a thread pool
//!
//! ## Usage
//!
//! ```rust
//! use g7221_core::{BlockDecoder, BlockEncoder, DefaultTables, QuantizerConfig, TableSet};
//!
//! // G.722.1 at 24 kbit/s: 14 regions, 480 bits per 20 ms block
//! let config = QuantizerConfig::g722_1();
//! let encoder: BlockEncoder = BlockEncoder::new(config.clone())?;
//! let decoder: BlockDecoder = BlockDecoder::new(config)?;
//!
//! let block = vec![<DefaultTables as TableSet>::Coefficient::default(); 280];
//! let encoded = encoder.encode(&block, 480)?;
//! let decoded = decoder.decode(&encoded)?;
//! assert_eq!(decoded.len(), 280);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `fixed-point`: Use the fixed-point table set by default

#![deny(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod g7221;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{CodecError, ErrorCategory, Result};
pub use g7221::{
    BlockDecoder, BlockEncoder, DefaultTables, EncodedBlock, FixedTables, FloatTables, TableSet,
};
pub use types::{ArithmeticMode, Category, Coding, QuantizerConfig, Symbol};

/// Version information for the quantization library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the quantization library
///
/// Builds the derived fixed-point tables ahead of the first block so the
/// first encode does not pay for it. It's safe to call multiple times.
///
/// # Errors
///
/// Currently infallible; the signature leaves room for table self-checks.
pub fn init() -> Result<()> {
    // Initialize logging if not already done
    let _ = tracing_subscriber::fmt::try_init();

    g7221::init_tables();

    tracing::info!("G7221-Core v{} initialized", VERSION);
    tracing::info!("Default arithmetic: {}", ArithmeticMode::build_default());

    Ok(())
}

/// Get library information
pub fn info() -> LibraryInfo {
    LibraryInfo {
        version: VERSION,
        arithmetic: ArithmeticMode::build_default(),
        region_size: g7221::tables::REGION_SIZE,
        categories: g7221::tables::NUM_CATEGORIES,
    }
}

/// Library information structure
#[derive(Debug, Clone)]
pub struct LibraryInfo {
    /// Library version
    pub version: &'static str,
    /// Arithmetic selected at build time
    pub arithmetic: ArithmeticMode,
    /// Coefficients per region
    pub region_size: usize,
    /// Number of quantization categories
    pub categories: usize,
}
