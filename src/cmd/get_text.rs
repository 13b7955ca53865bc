//! The `get-text` subcommand.

use aws_lambda_events::event::sns::SnsEvent;
use clap::Args;
use lambda_runtime::{LambdaEvent, service_fn};

use crate::{
    aws::load_aws_config,
    config::GetTextConfig,
    handlers::get_text::get_text,
    io::{read_json, write_json},
    ocr::textract::TextractTextDetector,
    prelude::*,
    store::s3::S3ObjectStore,
};

use super::{InvokeOpts, lambda_error, runtime_error};

/// `get-text` command line arguments.
#[derive(Debug, Args)]
pub struct GetTextOpts {
    #[clap(flatten)]
    pub config: GetTextConfig,

    #[clap(flatten)]
    pub invoke: InvokeOpts,
}

/// The `get-text` subcommand.
#[instrument(level = "debug", skip_all)]
pub async fn cmd_get_text(opts: &GetTextOpts) -> Result<()> {
    let aws_config = load_aws_config().await?;
    let ocr = TextractTextDetector::new(&aws_config);
    let store = S3ObjectStore::new(&aws_config);
    let config = &opts.config;

    if let Some(event_path) = &opts.invoke.event {
        let event: SnsEvent = read_json(event_path).await?;
        let output = get_text(&ocr, &store, config, &event).await?;
        return write_json(opts.invoke.output_path.as_deref(), &output).await;
    }

    let (ocr, store) = (&ocr, &store);
    lambda_runtime::run(service_fn(move |event: LambdaEvent<SnsEvent>| async move {
        get_text(ocr, store, config, &event.payload)
            .await
            .map_err(lambda_error)
    }))
    .await
    .map_err(runtime_error)
}
