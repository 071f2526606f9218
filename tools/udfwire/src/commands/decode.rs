use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tracing::warn;
use udfwire_codec::{DataCursor, TypeCursor, decode_value};

use crate::input::{parse_type, read_bytes};

#[derive(Args)]
pub struct DecodeArgs {
    /// Type descriptor as hex
    #[arg(short, long = "type")]
    type_descriptor: String,

    /// Data buffer as hex
    #[arg(required_unless_present = "input")]
    data: Option<String>,

    /// Read the data buffer from a raw binary file instead
    #[arg(short, long, conflicts_with = "data")]
    input: Option<PathBuf>,
}

impl DecodeArgs {
    pub fn run(self) -> Result<()> {
        let (descriptor, ty) = parse_type("type descriptor", &self.type_descriptor)?;
        let data = read_bytes("data", self.data.as_deref(), self.input.as_deref())?;

        let mut type_cursor = TypeCursor::new(&descriptor);
        let mut data_cursor = DataCursor::new(&data);
        let value = decode_value(&mut data_cursor, &mut type_cursor);
        if data_cursor.remaining() > 0 {
            warn!(
                remaining = data_cursor.remaining(),
                "data continues past the decoded {ty} value"
            );
        }
        println!("{value}");
        Ok(())
    }
}
