//! Report source-code measures of a srcML document
//!
//! The markdown report goes to stdout, timing to stderr.

use std::io::{self, Write};
use std::time::Instant;

use clap::Parser;

use rustysax::cli::{init_tracing, InputArgs};
use rustysax::{SrcFacts, XmlParser};

#[derive(Parser, Debug)]
#[command(name = "srcfacts")]
#[command(about = "Markdown report of measures of a srcML document")]
struct Args {
    #[command(flatten)]
    input: InputArgs,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();
    let start = Instant::now();

    let mut facts = SrcFacts::new();
    let stats = XmlParser::with_config(args.input.open()?, args.input.parser_config())
        .parse(&mut facts)?;
    let elapsed = start.elapsed();

    let mut out = io::stdout().lock();
    facts.write_report(&mut out, stats.total_bytes)?;
    out.flush()?;

    eprintln!();
    eprintln!("{:.3} sec", elapsed.as_secs_f64());
    eprintln!("{:.3} MLOC/sec", facts.mloc_per_sec(elapsed));
    Ok(())
}
