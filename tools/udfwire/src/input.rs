use std::{fs, path::Path};

use anyhow::{Context, Result};
use udfwire_core::TrinoType;

/// Parse hex text, ignoring whitespace and an optional `0x` prefix.
pub fn parse_hex(label: &str, text: &str) -> Result<Vec<u8>> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    let digits = compact.strip_prefix("0x").unwrap_or(&compact);
    hex::decode(digits).with_context(|| format!("{label} is not valid hex"))
}

/// Bytes from inline hex or, when `file` is given, the raw file contents.
pub fn read_bytes(label: &str, hex_text: Option<&str>, file: Option<&Path>) -> Result<Vec<u8>> {
    match (hex_text, file) {
        (_, Some(path)) => {
            fs::read(path).with_context(|| format!("failed to read {label} from {}", path.display()))
        }
        (Some(text), None) => parse_hex(label, text),
        (None, None) => anyhow::bail!("no {label} given"),
    }
}

/// Parse and validate a descriptor before it reaches the codec, which treats
/// corrupt descriptors as fatal.
pub fn parse_type(label: &str, descriptor_hex: &str) -> Result<(Vec<u8>, TrinoType)> {
    let descriptor = parse_hex(label, descriptor_hex)?;
    let ty = TrinoType::parse(&descriptor).with_context(|| format!("invalid {label}"))?;
    Ok((descriptor, ty))
}
