//! Interface to an asynchronous text-detection service.
//!
//! The handlers only talk to [`TextDetector`], so they can be tested without
//! AWS. [`textract::TextractTextDetector`] is the real implementation.

use crate::prelude::*;

pub mod textract;

/// Where an asynchronous job should announce that it has finished.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NotificationChannel {
    /// The SNS topic to publish to.
    pub topic_arn: String,

    /// The IAM role the OCR service assumes to publish.
    pub role_arn: String,
}

/// A request to start detecting text in a stored document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StartTextDetection {
    /// The bucket holding the document.
    pub bucket: String,

    /// The document's object key.
    pub key: String,

    /// Who to notify when the job finishes.
    pub notification_channel: NotificationChannel,
}

/// The kind of a detected block. We only care about lines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BlockKind {
    /// A line of text.
    Line,
    /// Anything else (pages, words, layout blocks, ...).
    Other(String),
}

/// A single block from a text-detection result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetectedBlock {
    /// What kind of block this is.
    pub kind: BlockKind,

    /// The 1-based page the block appears on.
    pub page: i64,

    /// The block's text. Always present for lines; empty for blocks that
    /// carry no text of their own.
    pub text: String,
}

impl DetectedBlock {
    /// Create a `LINE` block.
    #[cfg(test)]
    pub fn line(page: i64, text: impl Into<String>) -> Self {
        Self {
            kind: BlockKind::Line,
            page,
            text: text.into(),
        }
    }
}

/// One page of results from [`TextDetector::get_text_detection_result`].
///
/// This is a page of the service's paginated response, not a document page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextDetectionPage {
    /// The blocks in this response.
    pub blocks: Vec<DetectedBlock>,

    /// Pass this back to fetch the next response, if there is one.
    pub next_token: Option<String>,

    /// Any warnings the service attached to the response.
    pub warnings: Vec<String>,
}

/// Interface to an asynchronous text-detection service.
#[async_trait]
pub trait TextDetector: Send + Sync + 'static {
    /// Start a text-detection job and return its job ID.
    async fn start_text_detection(&self, request: &StartTextDetection) -> Result<String>;

    /// Fetch one response's worth of results for a finished job.
    async fn get_text_detection_result(
        &self,
        job_id: &str,
        next_token: Option<&str>,
    ) -> Result<TextDetectionPage>;
}
