//! Shared command-line plumbing for the bundled binaries

use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::parser::ParserConfig;
use crate::reader::DEFAULT_BUFFER_SIZE;

/// Input options common to every binary
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// XML file to read (defaults to stdin)
    pub input: Option<PathBuf>,

    /// Initial size of the input buffer in bytes
    #[arg(long = "buffer-size", value_name = "BYTES", default_value_t = DEFAULT_BUFFER_SIZE)]
    pub buffer_size: usize,
}

impl InputArgs {
    pub fn parser_config(&self) -> ParserConfig {
        ParserConfig::default().with_buffer_capacity(self.buffer_size)
    }

    /// Open the input file, or stdin when none was given
    pub fn open(&self) -> anyhow::Result<Box<dyn Read>> {
        match &self.input {
            Some(path) => {
                let file = File::open(path)
                    .with_context(|| format!("Failed to open {}", path.display()))?;
                Ok(Box::new(file))
            }
            None => Ok(Box::new(io::stdin().lock())),
        }
    }
}

/// Log to stderr, filtered by `RUST_LOG` (default `warn`)
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct TestCli {
        #[command(flatten)]
        input: InputArgs,
    }

    #[test]
    fn test_defaults_to_stdin() {
        let cli = TestCli::parse_from(["test"]);
        assert!(cli.input.input.is_none());
        assert_eq!(cli.input.parser_config(), ParserConfig::default());
    }

    #[test]
    fn test_buffer_size_flag() {
        let cli = TestCli::parse_from(["test", "--buffer-size", "4096", "doc.xml"]);
        assert_eq!(cli.input.input, Some(PathBuf::from("doc.xml")));
        assert_eq!(cli.input.parser_config().buffer_capacity, 4096);
    }

    #[test]
    fn test_missing_file_has_context() {
        let cli = TestCli::parse_from(["test", "/nonexistent/doc.xml"]);
        let err = cli.input.open().err().unwrap();
        assert!(err.to_string().contains("/nonexistent/doc.xml"));
    }
}
