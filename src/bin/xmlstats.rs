//! Report the number of each part of an XML document

use std::io::{self, Write};

use clap::Parser;

use rustysax::cli::{init_tracing, InputArgs};
use rustysax::{XmlParser, XmlStats};

#[derive(Parser, Debug)]
#[command(name = "xmlstats")]
#[command(about = "Markdown report of the number of each part of an XML document")]
struct Args {
    #[command(flatten)]
    input: InputArgs,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();

    let mut stats = XmlStats::new();
    let summary = XmlParser::with_config(args.input.open()?, args.input.parser_config())
        .parse(&mut stats)?;

    let mut out = io::stdout().lock();
    writeln!(out)?;
    stats.write_report(&mut out, summary.total_bytes)?;
    out.flush()?;
    Ok(())
}
