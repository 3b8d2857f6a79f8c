//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the crate:
//! - Vector and matrix math
//! - Logging utilities

pub mod logging;
pub mod math;
