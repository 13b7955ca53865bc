//! Command-line entry points.

use clap::Args;

use crate::prelude::*;

pub mod get_text;
pub mod schema;
pub mod start_text;

/// Options for running a handler once, outside of Lambda.
#[derive(Debug, Clone, Args)]
pub struct InvokeOpts {
    /// Run the handler once on this JSON event file instead of serving
    /// Lambda invocations.
    #[clap(long, value_name = "PATH")]
    pub event: Option<PathBuf>,

    /// Where to write the handler's result when using `--event`. Defaults to
    /// standard output.
    #[clap(short = 'o', long = "out", requires = "event")]
    pub output_path: Option<PathBuf>,
}

/// Convert a handler error into something the Lambda runtime can report.
///
/// The runtime only shows the top-level message, so we flatten the whole
/// context chain into it.
pub fn lambda_error(err: anyhow::Error) -> lambda_runtime::Error {
    error!("Handler failed: {err:?}");
    format!("{err:#}").into()
}

/// Convert an error from the Lambda runtime itself.
pub fn runtime_error(err: lambda_runtime::Error) -> anyhow::Error {
    anyhow!(err).context("Lambda runtime failed")
}
