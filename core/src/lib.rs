//! # hiddenbox core
//!
//! Geometry plumbing shared by the plane-tracking crates:
//!
//! - [`buffer`] - Strided decoding of raw vertex and index buffers
//! - [`mesh`] - Mesh descriptors and plane geometry generators
//! - [`math`] - Math type aliases and small helpers

pub mod buffer;
pub mod math;
pub mod mesh;

/// Core library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
