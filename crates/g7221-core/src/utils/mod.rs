//! Utility functions and helpers

pub mod validation;
