//! G.722.1 Region Categorization and Quantization
//!
//! This module implements the adaptive quantization core of ITU-T G.722.1
//! (and its 14 kHz Annex C): region power estimation, bit allocation across
//! quantization categories, and per-category quantization of normalized
//! transform coefficients. The transform itself and bitstream packing live
//! outside this module.
//!
//! # Architecture
//!
//! The implementation is split into several modules:
//! - `tables`: Quantization tables and constants
//! - `numeric`: Floating-point and fixed-point table sets behind one trait
//! - `power`: Region power estimation
//! - `allocation`: Category allocation under a bit budget
//! - `quantizer`: Category quantization and dequantization
//! - `codec`: Block-level encoder and decoder
//!
//! # Reference
//!
//! Based on ITU-T G.722.1 (2005-05) and its Annex C.

pub mod allocation;
pub mod codec;
pub mod numeric;
pub mod power;
pub mod quantizer;
pub mod tables;

#[cfg(test)]
mod tests;

// Re-export the block encoder and decoder
pub use codec::{BlockDecoder, BlockEncoder, EncodedBlock};

// Re-export key types
pub use allocation::{allocate, Allocation};
pub use numeric::{init_tables, DefaultTables, FixedTables, FloatTables, TableSet};
pub use power::{classify, estimate, RegionPower};
pub use quantizer::{dequantize, quantize};
