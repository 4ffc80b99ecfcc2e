//! G.722.1 Test Modules
//!
//! This module organizes the test suite for the G.722.1 quantization engine.

mod utils;
