//! Identity transformation: parse XML and write the equivalent XML

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use rustysax::cli::{init_tracing, InputArgs};
use rustysax::{IdentityTransform, XmlParser};

#[derive(Parser, Debug)]
#[command(name = "identity")]
#[command(about = "Copy an XML document through the parser")]
struct Args {
    #[command(flatten)]
    input: InputArgs,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();

    let out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };

    let mut identity = IdentityTransform::new(BufWriter::new(out));
    let stats = XmlParser::with_config(args.input.open()?, args.input.parser_config())
        .parse(&mut identity)?;
    identity.finish().context("Failed to write output")?;

    info!(bytes = stats.total_bytes, refills = stats.refills, "identity complete");
    Ok(())
}
