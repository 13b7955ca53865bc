//! Asynchronous text detection using AWS Textract.

use aws_sdk_textract::types::{
    Block, BlockType, DocumentLocation, JobStatus,
    NotificationChannel as TextractNotificationChannel, S3Object,
};

use crate::{aws::sdk_error, prelude::*};

use super::{BlockKind, DetectedBlock, StartTextDetection, TextDetectionPage, TextDetector};

/// Text detector wrapping the AWS Textract API.
#[derive(Clone, Debug)]
pub struct TextractTextDetector {
    /// AWS Textract client.
    client: aws_sdk_textract::Client,
}

impl TextractTextDetector {
    /// Create a new detector from a shared AWS configuration.
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: aws_sdk_textract::Client::new(config),
        }
    }
}

#[async_trait]
impl TextDetector for TextractTextDetector {
    #[instrument(level = "debug", skip_all, fields(bucket = %request.bucket, key = %request.key))]
    async fn start_text_detection(&self, request: &StartTextDetection) -> Result<String> {
        let document_location = DocumentLocation::builder()
            .s3_object(
                S3Object::builder()
                    .bucket(&request.bucket)
                    .name(&request.key)
                    .build(),
            )
            .build();
        let notification_channel = TextractNotificationChannel::builder()
            .sns_topic_arn(&request.notification_channel.topic_arn)
            .role_arn(&request.notification_channel.role_arn)
            .build()
            .context("cannot build Textract notification channel")?;

        let output = self
            .client
            .start_document_text_detection()
            .document_location(document_location)
            .notification_channel(notification_channel)
            .send()
            .await
            .map_err(sdk_error)
            .with_context(|| {
                format!(
                    "failed to start Textract text detection for s3://{}/{}",
                    request.bucket, request.key
                )
            })?;
        trace!("Start response: {output:#?}");

        output
            .job_id()
            .map(str::to_owned)
            .ok_or_else(|| anyhow!("Textract did not return a job ID"))
    }

    #[instrument(level = "debug", skip(self))]
    async fn get_text_detection_result(
        &self,
        job_id: &str,
        next_token: Option<&str>,
    ) -> Result<TextDetectionPage> {
        let output = self
            .client
            .get_document_text_detection()
            .job_id(job_id)
            .set_next_token(next_token.map(str::to_owned))
            .send()
            .await
            .map_err(sdk_error)
            .with_context(|| format!("failed to get Textract results for job {job_id}"))?;

        match output.job_status() {
            None | Some(JobStatus::Succeeded) => {}
            Some(status) => warn!(
                %job_id,
                status = %status.as_str(),
                message = output.status_message().unwrap_or_default(),
                "Textract job did not fully succeed"
            ),
        }

        let blocks = output
            .blocks()
            .iter()
            .map(detected_block)
            .collect::<Result<Vec<_>>>()?;
        let warnings = output
            .warnings()
            .iter()
            .map(|warning| {
                format!(
                    "{} (pages {:?})",
                    warning.error_code().unwrap_or("UNKNOWN"),
                    warning.pages()
                )
            })
            .collect();

        Ok(TextDetectionPage {
            blocks,
            next_token: output.next_token().map(str::to_owned),
            warnings,
        })
    }
}

/// Convert a Textract block into our own representation.
fn detected_block(block: &Block) -> Result<DetectedBlock> {
    let kind = match block.block_type() {
        Some(BlockType::Line) => BlockKind::Line,
        Some(other) => BlockKind::Other(other.as_str().to_owned()),
        None => BlockKind::Other("UNKNOWN".to_owned()),
    };
    let page = match (&kind, block.page()) {
        (_, Some(page)) => i64::from(page),
        (BlockKind::Line, None) => {
            return Err(anyhow!(
                "Textract LINE block {} has no page number",
                block.id().unwrap_or("UNKNOWN")
            ));
        }
        (BlockKind::Other(_), None) => 0,
    };
    let text = match (&kind, block.text()) {
        (_, Some(text)) => text.to_owned(),
        (BlockKind::Line, None) => {
            return Err(anyhow!(
                "Textract LINE block {} has no text",
                block.id().unwrap_or("UNKNOWN")
            ));
        }
        (BlockKind::Other(_), None) => String::new(),
    };
    Ok(DetectedBlock { kind, page, text })
}
