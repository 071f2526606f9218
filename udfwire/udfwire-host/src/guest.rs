//! The guest function collaborator.

use udfwire_core::Value;

use crate::{error::FormatError, error_result::ErrorResult, exception::GuestException};

/// A callable hosted by [`UdfHost`](crate::UdfHost).
///
/// Invocations are strictly sequential; the host never calls back in while a
/// call is running.
pub trait GuestFunction {
    /// Name the function was registered under.
    fn name(&self) -> &str;

    /// Invoke the function with the decoded positional arguments.
    fn call(&mut self, args: Vec<Value>) -> Result<Value, GuestException>;

    /// Turn a raised exception into an error result.
    ///
    /// The default applies [`GuestException::to_error_result`]. Returning
    /// [`FormatError::OutOfMemory`] yields a fixed memory-limit error; any other
    /// failure terminates the process.
    fn format_exception(&self, exception: &GuestException) -> Result<ErrorResult, FormatError> {
        Ok(exception.to_error_result())
    }
}

/// [`GuestFunction`] backed by a closure.
pub struct FnGuest<F> {
    name: String,
    function: F,
}

impl<F> FnGuest<F>
where
    F: FnMut(Vec<Value>) -> Result<Value, GuestException>,
{
    pub fn new(name: impl Into<String>, function: F) -> Self {
        Self {
            name: name.into(),
            function,
        }
    }
}

impl<F> GuestFunction for FnGuest<F>
where
    F: FnMut(Vec<Value>) -> Result<Value, GuestException>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn call(&mut self, args: Vec<Value>) -> Result<Value, GuestException> {
        (self.function)(args)
    }
}
