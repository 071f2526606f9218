use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Args;
use udfwire_core::{TrinoType, Value};
use udfwire_host::{FnGuest, UdfHost};

use crate::input::{parse_type, read_bytes};

#[derive(Args)]
pub struct EchoArgs {
    /// Argument row type descriptor as hex; its first field is the return type
    #[arg(short, long = "type")]
    type_descriptor: String,

    /// Argument buffer as hex
    #[arg(required_unless_present = "input")]
    data: Option<String>,

    /// Read the argument buffer from a raw binary file instead
    #[arg(short, long, conflicts_with = "data")]
    input: Option<PathBuf>,

    /// Initial result buffer capacity in bytes
    #[arg(long, default_value_t = 1024)]
    initial_capacity: usize,
}

impl EchoArgs {
    pub fn run(self) -> Result<()> {
        let (descriptor, ty) = parse_type("argument type descriptor", &self.type_descriptor)?;
        let data = read_bytes("argument buffer", self.data.as_deref(), self.input.as_deref())?;
        let return_type = match &ty {
            TrinoType::Row(fields) if !fields.is_empty() => fields[0].to_descriptor(),
            _ => bail!("echo needs a row type with at least one field, found {ty}"),
        };

        let guest = FnGuest::new("echo", |args: Vec<Value>| {
            Ok(args.into_iter().next().unwrap_or(Value::Null))
        });
        let mut host = UdfHost::builder()
            .argument_type(descriptor)
            .return_type(return_type)
            .initial_capacity(self.initial_capacity)
            .build(guest)
            .context("failed to set up host")?;

        match host.execute(&data) {
            Ok(result) => {
                println!("{}", hex::encode(&result));
                Ok(())
            }
            Err(error) => {
                println!("{}", hex::encode(error.to_bytes()));
                Err(error).context("echo invocation failed")
            }
        }
    }
}
