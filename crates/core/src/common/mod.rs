//! Common utilities and types used throughout the cache simulator.
//!
//! This module provides the building blocks shared by every component:
//! 1. **Address Fields:** Bit masks and the decoded tag/index/offset form of an address.
//! 2. **Geometry:** The validated cache shape and its address layout.
//! 3. **Memory Access:** Access kinds, words and trace records.
//! 4. **Error Handling:** Configuration and trace errors.

/// Address masks and decoded address fields.
pub mod addr;

/// Memory access type definitions.
pub mod data;

/// Error types.
pub mod error;

/// Validated cache geometry.
pub mod geometry;

pub use addr::DecodedAddr;
pub use data::{AccessKind, AccessRecord, Word};
pub use error::{ConfigError, TraceError};
pub use geometry::Geometry;
