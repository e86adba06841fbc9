//! Crate error type
//!
//! The rasterizer itself never fails: degenerate triangles are culled and
//! counted, out-of-range accesses are no-ops or defined defaults. The only
//! caller-visible failures are buffer allocation and texture validation.

use std::collections::TryReserveError;

/// Errors surfaced to the caller.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Buffer memory could not be obtained. No partial buffer is retained.
    #[error("failed to allocate {what} buffer ({width}x{height})")]
    Alloc {
        what: &'static str,
        width: usize,
        height: usize,
        #[source]
        source: TryReserveError,
    },

    /// Texture dimensions must be powers of two, at most 256 per axis.
    #[error("invalid texture size {width}x{height} (power of two, max {max} per axis)")]
    TextureSize {
        width: usize,
        height: usize,
        max: usize,
    },

    /// Texel upload whose length does not match the stated dimensions.
    #[error("texture data has {actual} texels, {width}x{height} needs {expected}")]
    TextureData {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },
}
