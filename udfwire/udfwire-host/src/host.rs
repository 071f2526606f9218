//! Session host: one decode, invoke, encode cycle per [`UdfHost::execute`] call.

use bytes::Bytes;
use tracing::debug;
use udfwire_codec::{HEADER_LEN, decode_arguments, encode_result_with_capacity};
use udfwire_core::{TrinoType, TypeKind};

use crate::{
    config::HostConfig, error::HostError, error_result::ErrorResult, guest::GuestFunction,
    translate,
};

/// Hosts a single guest function for a session.
///
/// Both type descriptors are validated once at [`UdfHostBuilder::build`] and are
/// read-only afterwards.
pub struct UdfHost<G> {
    guest: G,
    argument_type: Bytes,
    return_type: Bytes,
    argument_signature: TrinoType,
    return_signature: TrinoType,
    config: HostConfig,
}

/// Builder for configuring [`UdfHost`].
#[derive(Debug, Default)]
pub struct UdfHostBuilder {
    argument_type: Option<Bytes>,
    return_type: Option<Bytes>,
    config: HostConfig,
}

impl UdfHost<()> {
    /// Create a builder for [`UdfHost`].
    pub fn builder() -> UdfHostBuilder {
        UdfHostBuilder::default()
    }
}

impl<G: GuestFunction> UdfHost<G> {
    /// Run one invocation over an argument buffer.
    ///
    /// On success returns the length-prefixed result. Guest exceptions and
    /// unencodable results come back as an [`ErrorResult`]; protocol violations in
    /// `data` terminate the process.
    pub fn execute(&mut self, data: &[u8]) -> Result<Bytes, ErrorResult> {
        debug!(function = self.guest.name(), len = data.len(), "execute");
        let args = decode_arguments(&self.argument_type, data);
        debug!(count = args.len(), "execute: invoke");

        let value = match self.guest.call(args) {
            Ok(value) => value,
            Err(exception) => {
                debug!(%exception, "execute: guest raised");
                let result = translate::guest_failure(&self.guest, &exception);
                debug!(code = %result.code, "execute: error result");
                return Err(result);
            }
        };

        match encode_result_with_capacity(&value, &self.return_type, self.config.initial_capacity)
        {
            Ok(bytes) => {
                debug!(payload = bytes.len() - HEADER_LEN, "execute: completed");
                Ok(bytes)
            }
            Err(e) => {
                debug!(
                    error = %e,
                    returns = %self.return_signature,
                    "execute: result conversion failed"
                );
                Err(translate::encode_failure(&e))
            }
        }
    }

    pub fn guest(&self) -> &G {
        &self.guest
    }

    pub fn guest_mut(&mut self) -> &mut G {
        &mut self.guest
    }

    pub fn into_guest(self) -> G {
        self.guest
    }

    /// Parsed argument row type.
    pub fn argument_signature(&self) -> &TrinoType {
        &self.argument_signature
    }

    pub fn return_signature(&self) -> &TrinoType {
        &self.return_signature
    }

    pub fn config(&self) -> &HostConfig {
        &self.config
    }
}

impl UdfHostBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the argument type descriptor. Must describe a ROW.
    pub fn argument_type(mut self, descriptor: impl Into<Bytes>) -> Self {
        self.argument_type = Some(descriptor.into());
        self
    }

    /// Set the return type descriptor.
    pub fn return_type(mut self, descriptor: impl Into<Bytes>) -> Self {
        self.return_type = Some(descriptor.into());
        self
    }

    pub fn config(mut self, config: HostConfig) -> Self {
        self.config = config;
        self
    }

    pub fn initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.config.initial_capacity = initial_capacity;
        self
    }

    /// Validate the descriptors and attach `guest`.
    pub fn build<G: GuestFunction>(self, guest: G) -> Result<UdfHost<G>, HostError> {
        let (argument_type, argument_signature) = parse_descriptor("argument", self.argument_type)?;
        let (return_type, return_signature) = parse_descriptor("return", self.return_type)?;
        if argument_signature.kind() != TypeKind::Row {
            return Err(HostError::ArgumentTypeNotRow {
                found: argument_signature,
            });
        }

        debug!(
            function = guest.name(),
            arguments = %argument_signature,
            returns = %return_signature,
            "setup complete"
        );
        Ok(UdfHost {
            guest,
            argument_type,
            return_type,
            argument_signature,
            return_signature,
            config: self.config,
        })
    }
}

fn parse_descriptor(
    role: &'static str,
    descriptor: Option<Bytes>,
) -> Result<(Bytes, TrinoType), HostError> {
    let descriptor = descriptor.ok_or(HostError::MissingDescriptor { role })?;
    let ty = TrinoType::parse(&descriptor)
        .map_err(|source| HostError::InvalidDescriptor { role, source })?;
    Ok((descriptor, ty))
}
