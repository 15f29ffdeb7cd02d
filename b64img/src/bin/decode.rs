//! decode — turn a base64 text file back into bytes and preview the result.

use anyhow::Context;
use b64image::DecodeJob;
use b64img::cli::{self, DecodeArgs};
use b64img::output;

fn main() -> anyhow::Result<()> {
    let args: DecodeArgs = cli::parse_or_exit();
    cli::init_logging(args.common.verbose);
    tracing::debug!(?args, "parsed arguments");

    let report = DecodeJob::new(&args.base64_text_file)
        .with_output(&args.output)
        .with_introspection(!args.no_preview)
        .with_limits(args.common.limits())
        .run()
        .with_context(|| format!("decoding {}", args.base64_text_file.display()))?;

    if args.common.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", output::decode_summary(&report));
    }
    Ok(())
}
