//! encode — write an image file out as base64 text.

use anyhow::Context;
use b64image::{EncodeJob, PipelineError};
use b64img::cli::{self, EncodeArgs};
use b64img::output;

fn main() -> anyhow::Result<()> {
    let args: EncodeArgs = cli::parse_or_exit();
    cli::init_logging(args.common.verbose);
    tracing::debug!(?args, "parsed arguments");

    let job = EncodeJob::new(&args.image_path)
        .with_output(&args.output_path)
        .with_limits(args.common.limits());

    let report = match job.run() {
        Ok(report) => report,
        Err(e @ PipelineError::PathNotFound(_)) => {
            println!("Error: {e}");
            std::process::exit(1);
        }
        Err(e) => {
            return Err(e).with_context(|| format!("encoding {}", args.image_path.display()));
        }
    };

    if args.common.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", output::encode_summary(&report));
    }
    Ok(())
}
