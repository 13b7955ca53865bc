use std::str::FromStr;

use clap::{Parser, Subcommand};
use tracing_subscriber::{
    EnvFilter, Layer as _, filter::Directive, fmt::format::FmtSpan, layer::SubscriberExt,
    util::SubscriberInitExt as _,
};

use self::prelude::*;

mod aws;
mod cmd;
mod columnar;
mod config;
mod events;
mod handlers;
mod io;
mod ocr;
mod pages;
mod prelude;
mod store;

/// OCR uploaded PDFs with AWS Textract and store their text as Parquet.
#[derive(Debug, Parser)]
#[clap(
    version,
    author,
    after_help = r#"
Environment Variables:
  - NOTIFICATION_TOPIC_ARN: SNS topic for Textract job completion (start-text).
  - NOTIFICATION_ROLE_ARN: IAM role Textract uses to publish (start-text).
  - OUTPUT_BUCKET: Bucket for Parquet results (get-text).
  - GLUE_CATALOG_DB_NAME, GLUE_CATALOG_TABLE_NAME (optional): Accepted by
    get-text, currently unused.
  - RUST_LOG (optional): Log filter, defaults to "info".

  Standard AWS environment variables and credential files
  are used for Textract and S3.

  These variables may be set in a standard `.env` file.
"#
)]
struct Opts {
    #[clap(subcommand)]
    subcmd: Cmd,
}

/// The subcommands we support.
#[derive(Debug, Subcommand)]
enum Cmd {
    /// Handle S3 upload events by starting Textract text detection.
    StartText(cmd::start_text::StartTextOpts),
    /// Handle Textract completion notifications by writing page text to S3.
    GetText(cmd::get_text::GetTextOpts),
    /// Print schemas for message and output formats.
    Schema(cmd::schema::SchemaOpts),
}

/// Our entry point, which can return an error. [`anyhow::Result`] will
/// automatically print a nice error message with optional backtrace.
#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing. Lambda sends stderr to CloudWatch, which does not
    // understand ANSI colors.
    let directive =
        Directive::from_str("info").expect("built-in directive should be valid");
    let env_filter = EnvFilter::builder()
        .with_default_directive(directive)
        .from_env_lossy();

    let subscriber = tracing_subscriber::fmt::layer()
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .with_filter(env_filter);

    tracing_subscriber::registry().with(subscriber).init();

    // Call our real `main` function now that logging is set up.
    real_main().await
}

/// Our real entry point.
#[instrument(level = "debug", name = "main", skip_all)]
async fn real_main() -> Result<()> {
    // Load environment variables from a `.env` file, if it exists.
    dotenvy::dotenv().ok();

    // Parse command-line arguments.
    let opts = Opts::parse();
    debug!("Parsed options: {:?}", opts);

    // Run the appropriate subcommand.
    match &opts.subcmd {
        Cmd::StartText(opts) => {
            cmd::start_text::cmd_start_text(opts).await?;
        }
        Cmd::GetText(opts) => {
            cmd::get_text::cmd_get_text(opts).await?;
        }
        Cmd::Schema(schema_opts) => {
            cmd::schema::cmd_schema(schema_opts).await?;
        }
    }
    Ok(())
}
