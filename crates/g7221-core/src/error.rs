//! Error handling for the quantization engine
//!
//! Failures are surfaced to the caller rather than recovered locally: whether
//! to mute, repeat the last block or stop the stream is a media-pipeline
//! decision.

#![allow(missing_docs)]

use crate::types::{ArithmeticMode, Category, Symbol};
use std::fmt;
use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, CodecError>;

/// Error type for categorization and quantization
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CodecError {
    /// Invalid engine configuration
    #[error("Invalid configuration: {details}")]
    InvalidConfig { details: String },

    /// Block or region length does not match the configuration
    #[error("Invalid frame size: expected {expected}, got {actual}")]
    InvalidFrameSize { expected: usize, actual: usize },

    /// Non-finite or otherwise unusable input coefficient
    #[error("Invalid input at coefficient {index}: {details}")]
    InvalidInput { index: usize, details: String },

    /// Decoded symbol outside the valid range of its category
    #[error("Malformed symbol {symbol} in region {region} ({category}, valid {min}..={max})")]
    MalformedSymbol {
        region: usize,
        category: Category,
        symbol: Symbol,
        min: Symbol,
        max: Symbol,
    },

    /// Wrong number of symbols for a region
    #[error("Symbol count mismatch in region {region}: expected {expected}, got {actual}")]
    SymbolCountMismatch {
        region: usize,
        expected: usize,
        actual: usize,
    },

    /// Side information (power buckets, region count) is inconsistent
    #[error("Invalid side information: {details}")]
    InvalidSideInfo { details: String },

    /// Transmitted categories disagree with the recomputed allocation
    #[error("Category mismatch in region {region}: transmitted {transmitted}, recomputed {recomputed}")]
    CategoryMismatch {
        region: usize,
        transmitted: Category,
        recomputed: Category,
    },

    /// Encoder and decoder were built for different numeric representations
    #[error("Arithmetic mismatch: expected {expected}, got {actual}")]
    ArithmeticMismatch {
        expected: ArithmeticMode,
        actual: ArithmeticMode,
    },

    /// Internal error (should not occur in normal operation)
    #[error("Internal error: {message} (this is a bug, please report it)")]
    InternalError { message: String },
}

impl CodecError {
    /// Create a new invalid configuration error
    pub fn invalid_config(details: impl Into<String>) -> Self {
        Self::InvalidConfig {
            details: details.into(),
        }
    }

    /// Create a new invalid input error
    pub fn invalid_input(index: usize, details: impl Into<String>) -> Self {
        Self::InvalidInput {
            index,
            details: details.into(),
        }
    }

    /// Create a new invalid side information error
    pub fn invalid_side_info(details: impl Into<String>) -> Self {
        Self::InvalidSideInfo {
            details: details.into(),
        }
    }

    /// Create a new internal error
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }

    /// Attach a region index to region-level decode errors
    pub fn in_region(self, index: usize) -> Self {
        match self {
            Self::MalformedSymbol {
                category,
                symbol,
                min,
                max,
                ..
            } => Self::MalformedSymbol {
                region: index,
                category,
                symbol,
                min,
                max,
            },
            Self::SymbolCountMismatch {
                expected, actual, ..
            } => Self::SymbolCountMismatch {
                region: index,
                expected,
                actual,
            },
            other => other,
        }
    }

    /// Check if the stream can continue after this error
    ///
    /// Malformed blocks only spoil themselves; the caller may conceal them
    /// and carry on with the next block.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::InvalidConfig { .. }
            | Self::ArithmeticMismatch { .. }
            | Self::InternalError { .. } => false,

            Self::InvalidFrameSize { .. }
            | Self::InvalidInput { .. }
            | Self::MalformedSymbol { .. }
            | Self::SymbolCountMismatch { .. }
            | Self::InvalidSideInfo { .. }
            | Self::CategoryMismatch { .. } => true,
        }
    }

    /// Get the error category
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidConfig { .. } | Self::ArithmeticMismatch { .. } => {
                ErrorCategory::Configuration
            }

            Self::InvalidFrameSize { .. } | Self::InvalidInput { .. } => ErrorCategory::Input,

            Self::MalformedSymbol { .. }
            | Self::SymbolCountMismatch { .. }
            | Self::InvalidSideInfo { .. }
            | Self::CategoryMismatch { .. } => ErrorCategory::MalformedBlock,

            Self::InternalError { .. } => ErrorCategory::Internal,
        }
    }
}

/// Error category for grouping related errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Configuration and parameter errors
    Configuration,
    /// Unusable encoder input
    Input,
    /// Decoder input corrupted in transport
    MalformedBlock,
    /// Internal library errors
    Internal,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration => write!(f, "Configuration"),
            Self::Input => write!(f, "Input"),
            Self::MalformedBlock => write!(f, "Malformed block"),
            Self::Internal => write!(f, "Internal"),
        }
    }
}
