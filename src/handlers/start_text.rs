//! Start a Textract job for every uploaded document.

use aws_lambda_events::event::s3::S3Event;

use crate::{
    config::StartTextConfig,
    events::uploaded_objects,
    ocr::{StartTextDetection, TextDetector},
    prelude::*,
};

/// Handle an S3 object-creation event.
///
/// Textract will publish to the configured topic when each job finishes,
/// which is what triggers [`super::get_text::get_text`]. Any error starting a
/// job is returned as-is. There are no retries.
#[instrument(level = "debug", skip_all)]
pub async fn start_text(
    ocr: &dyn TextDetector,
    config: &StartTextConfig,
    event: &S3Event,
) -> Result<()> {
    let objects = uploaded_objects(event)?;
    if objects.is_empty() {
        warn!("S3 event contained no records");
    }

    for object in objects {
        let request = StartTextDetection {
            bucket: object.bucket,
            key: object.key,
            notification_channel: config.notification_channel(),
        };
        let job_id = ocr.start_text_detection(&request).await?;
        info!(
            bucket = %request.bucket,
            key = %request.key,
            %job_id,
            "Started text detection"
        );
    }
    Ok(())
}
