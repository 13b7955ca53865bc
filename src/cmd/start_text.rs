//! The `start-text` subcommand.

use aws_lambda_events::event::s3::S3Event;
use clap::Args;
use lambda_runtime::{LambdaEvent, service_fn};

use crate::{
    aws::load_aws_config,
    config::StartTextConfig,
    handlers::start_text::start_text,
    io::{read_json, write_json},
    ocr::textract::TextractTextDetector,
    prelude::*,
};

use super::{InvokeOpts, lambda_error, runtime_error};

/// `start-text` command line arguments.
#[derive(Debug, Args)]
pub struct StartTextOpts {
    #[clap(flatten)]
    pub config: StartTextConfig,

    #[clap(flatten)]
    pub invoke: InvokeOpts,
}

/// The `start-text` subcommand.
#[instrument(level = "debug", skip_all)]
pub async fn cmd_start_text(opts: &StartTextOpts) -> Result<()> {
    let aws_config = load_aws_config().await?;
    let ocr = TextractTextDetector::new(&aws_config);
    let config = &opts.config;

    if let Some(event_path) = &opts.invoke.event {
        let event: S3Event = read_json(event_path).await?;
        start_text(&ocr, config, &event).await?;
        return write_json(opts.invoke.output_path.as_deref(), &Value::Null).await;
    }

    let ocr = &ocr;
    lambda_runtime::run(service_fn(move |event: LambdaEvent<S3Event>| async move {
        start_text(ocr, config, &event.payload)
            .await
            .map_err(lambda_error)
    }))
    .await
    .map_err(runtime_error)
}
