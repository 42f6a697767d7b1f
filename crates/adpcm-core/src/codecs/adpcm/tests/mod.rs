//! IMA ADPCM Test Modules
//!
//! This module organizes the test suite for the IMA ADPCM codec implementation.

mod utils;
