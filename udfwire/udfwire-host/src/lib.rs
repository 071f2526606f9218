//! Session host for a single Trino scalar function.
//!
//! A [`UdfHost`] owns the argument and return type descriptors for the session
//! and a [`GuestFunction`]. Each [`UdfHost::execute`] decodes an argument buffer,
//! invokes the guest and encodes either the result or an [`ErrorResult`].

mod config;
mod error;
mod error_result;
mod exception;
mod guest;
mod host;
mod translate;

pub use config::HostConfig;
pub use error::{FormatError, HostError};
pub use error_result::ErrorResult;
pub use exception::{ExceptionKind, GuestException};
pub use guest::{FnGuest, GuestFunction};
pub use host::{UdfHost, UdfHostBuilder};
pub use translate::{encode_failure, guest_failure};
