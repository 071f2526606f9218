//! Error types for descriptor handling and the fatal protocol-violation path.

use std::fmt::Display;

/// A kind tag that does not name any [`TypeKind`](crate::TypeKind).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unsupported Trino type {0}")]
pub struct UnknownTypeTag(pub i32);

/// Error returned by [`TrinoType::parse`](crate::TrinoType::parse).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DescriptorError {
    #[error("type descriptor truncated at offset {offset}")]
    Truncated { offset: usize },

    #[error("{source} at offset {offset}")]
    UnknownTag {
        offset: usize,
        #[source]
        source: UnknownTypeTag,
    },

    #[error("negative row field count {count} at offset {offset}")]
    NegativeFieldCount { offset: usize, count: i32 },

    #[error("{remaining} trailing bytes after type descriptor")]
    TrailingBytes { remaining: usize },
}

/// Terminate on a producer/consumer protocol violation.
///
/// Corrupt descriptors, truncated data and failed allocations leave no state worth
/// continuing from. Release builds abort on panic.
#[cold]
#[track_caller]
pub fn fatal(detail: impl Display) -> ! {
    tracing::error!(%detail, "protocol violation");
    panic!("protocol violation: {detail}");
}
