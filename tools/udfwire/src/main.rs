mod commands;
mod input;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{decode::DecodeArgs, describe::DescribeArgs, echo::EchoArgs};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "udfwire", about = "Inspect Trino UDF type descriptors and wire buffers")]
struct Cli {
    /// Log codec and host activity at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the SQL signature of a type descriptor
    Describe(DescribeArgs),
    /// Decode a data buffer against a type descriptor
    Decode(DecodeArgs),
    /// Decode an argument row and encode its first field as the result
    Echo(EchoArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Describe(args) => args.run(),
        Commands::Decode(args) => args.run(),
        Commands::Echo(args) => args.run(),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .init();
}
