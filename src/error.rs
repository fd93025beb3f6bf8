//! Errors reported by the hashing engines and the streaming driver.

use crate::variant::Algorithm;

/// Result type used throughout this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while driving an engine.
///
/// All errors are detected before a context is touched, so a call that returns
/// an error leaves its context exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("data length {len} is not a multiple of the {block_size}-byte block")]
    UnalignedUpdate { len: usize, block_size: usize },
    #[error("final chunk of {len} bytes does not fit into a {block_size}-byte block")]
    TailTooLong { len: usize, block_size: usize },
    #[error("unsupported {family} digest size of {bits} bits")]
    UnsupportedDigestSize { family: &'static str, bits: u32 },
    #[error("unknown hash algorithm `{0}`")]
    UnknownAlgorithm(String),
    #[error("context was already finalized, clean it before reuse")]
    Finalized,
    #[error("{algorithm} self test failed: {check}")]
    SelfTestFailed {
        algorithm: Algorithm,
        check: &'static str,
    },
}

impl Error {
    /// `true` for a violated block-alignment or size bound.
    pub fn is_wrong_length(&self) -> bool {
        matches!(self, Error::UnalignedUpdate { .. } | Error::TailTooLong { .. })
    }

    /// `true` for an unsupported variant selector or algorithm name.
    pub fn is_invalid_value(&self) -> bool {
        matches!(
            self,
            Error::UnsupportedDigestSize { .. } | Error::UnknownAlgorithm(_)
        )
    }
}
