//! Argument definitions, usage handling, and logging setup.

use std::path::PathBuf;

use b64image::{DEFAULT_DECODE_OUTPUT, DEFAULT_ENCODE_OUTPUT, Limits};
use clap::{Args, Parser};
use tracing_subscriber::EnvFilter;

/// Flags both tools accept.
#[derive(Args, Debug, Default)]
pub struct CommonArgs {
    /// Print the report as JSON instead of text.
    #[arg(long)]
    pub json: bool,

    /// Refuse input files larger than this many bytes.
    #[arg(long, value_name = "BYTES")]
    pub max_input_size: Option<u64>,

    /// Log pipeline steps to stderr.
    #[arg(short, long)]
    pub verbose: bool,
}

impl CommonArgs {
    pub fn limits(&self) -> Limits {
        match self.max_input_size {
            Some(max) => Limits::none().with_max_input_bytes(max),
            None => Limits::none(),
        }
    }
}

/// Encode an image file as base64 text.
#[derive(Parser, Debug)]
#[command(name = "encode", version)]
pub struct EncodeArgs {
    /// Image file to encode.
    pub image_path: PathBuf,

    /// Text file to write.
    #[arg(default_value = DEFAULT_ENCODE_OUTPUT)]
    pub output_path: PathBuf,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Decode a base64 text file back into binary and preview it as an image.
#[derive(Parser, Debug)]
#[command(name = "decode", version)]
pub struct DecodeArgs {
    /// Text file holding base64; whitespace and missing padding are tolerated.
    pub base64_text_file: PathBuf,

    /// Where to write the decoded bytes.
    #[arg(short, long, default_value = DEFAULT_DECODE_OUTPUT)]
    pub output: PathBuf,

    /// Skip the image format and dimensions preview.
    #[arg(long)]
    pub no_preview: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Parse the process arguments.
///
/// Help and version requests exit 0. Any other parse failure (a missing
/// required argument, an unknown flag) prints usage and exits 1.
pub fn parse_or_exit<P: Parser>() -> P {
    match P::try_parse() {
        Ok(args) => args,
        Err(e) if e.use_stderr() => {
            let _ = e.print();
            std::process::exit(1);
        }
        Err(e) => e.exit(),
    }
}

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins when set; otherwise warnings only, or everything down to
/// debug with `--verbose`.
pub fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
