use anyhow::Result;
use clap::{Args, ValueEnum};
use udfwire_core::TrinoType;

use crate::input::parse_type;

#[derive(Clone, Copy, Debug, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum DescribeFormat {
    Signature,
    Tree,
}

#[derive(Args)]
pub struct DescribeArgs {
    /// Type descriptor as hex
    descriptor: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = DescribeFormat::Signature)]
    format: DescribeFormat,
}

impl DescribeArgs {
    pub fn run(self) -> Result<()> {
        let (_, ty) = parse_type("type descriptor", &self.descriptor)?;
        match self.format {
            DescribeFormat::Signature => println!("{ty}"),
            DescribeFormat::Tree => print!("{}", render_tree(&ty)),
        }
        Ok(())
    }
}

/// One node per line, children indented, each with its wire tag.
fn render_tree(ty: &TrinoType) -> String {
    let mut out = String::new();
    write_node(&mut out, ty, 0);
    out
}

fn write_node(out: &mut String, ty: &TrinoType, depth: usize) {
    let kind = ty.kind();
    out.push_str(&format!("{:indent$}{kind} [{}]", "", kind.tag(), indent = depth * 2));
    match ty {
        TrinoType::Row(fields) => {
            out.push_str(&format!(" {} fields\n", fields.len()));
            for field in fields {
                write_node(out, field, depth + 1);
            }
        }
        TrinoType::Array(element) => {
            out.push('\n');
            write_node(out, element, depth + 1);
        }
        TrinoType::Map { key, value } => {
            out.push('\n');
            write_node(out, key, depth + 1);
            write_node(out, value, depth + 1);
        }
        _ => out.push('\n'),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tree_lists_nodes_in_descriptor_order() {
        let ty = TrinoType::row([
            TrinoType::Integer,
            TrinoType::map(TrinoType::Varchar, TrinoType::array(TrinoType::Uuid)),
        ]);
        assert_eq!(
            render_tree(&ty),
            "ROW [0] 2 fields\n  INTEGER [5]\n  MAP [2]\n    VARCHAR [11]\n    ARRAY [1]\n      UUID [21]\n"
        );
    }
}
