//! Error types for the host.

use udfwire_core::{DescriptorError, TrinoType};

/// Errors produced while building a [`UdfHost`](crate::UdfHost).
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// The builder was not given a required descriptor.
    #[error("{role} type descriptor not set")]
    MissingDescriptor { role: &'static str },

    /// A descriptor failed to parse.
    #[error("invalid {role} type descriptor: {source}")]
    InvalidDescriptor {
        role: &'static str,
        #[source]
        source: DescriptorError,
    },

    /// The argument descriptor parsed but is not a row.
    #[error("argument type must be a row, found {found}")]
    ArgumentTypeNotRow { found: TrinoType },
}

/// Failure of [`GuestFunction::format_exception`](crate::GuestFunction::format_exception).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    /// Memory ran out while formatting.
    #[error("out of memory while formatting guest exception")]
    OutOfMemory,

    #[error("failed to format guest exception: {0}")]
    Failed(String),
}
