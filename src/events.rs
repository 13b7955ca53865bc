//! The Lambda events that trigger our handlers.
//!
//! The outer envelopes come from [`aws_lambda_events`]. The Textract
//! completion message is a JSON document stored as a string inside the SNS
//! envelope, so we define that type ourselves.

use aws_lambda_events::event::{s3::S3Event, sns::SnsEvent};
use percent_encoding::percent_decode_str;
use schemars::JsonSchema;

use crate::prelude::*;

/// The job status Textract reports for a job that finished normally.
pub const JOB_SUCCEEDED: &str = "SUCCEEDED";

/// The suffix we strip from object names to get a document name.
const PDF_SUFFIX: &str = ".pdf";

/// An object named by an S3 object-creation record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadedObject {
    /// The bucket containing the object.
    pub bucket: String,

    /// The object key, already URL-decoded.
    pub key: String,
}

/// Get every uploaded object named by an S3 event.
pub fn uploaded_objects(event: &S3Event) -> Result<Vec<UploadedObject>> {
    event
        .records
        .iter()
        .enumerate()
        .map(|(idx, record)| {
            let bucket = record
                .s3
                .bucket
                .name
                .clone()
                .ok_or_else(|| anyhow!("S3 event record {idx} has no bucket name"))?;
            let raw_key = record
                .s3
                .object
                .key
                .as_deref()
                .ok_or_else(|| anyhow!("S3 event record {idx} has no object key"))?;
            Ok(UploadedObject {
                bucket,
                key: decode_s3_key(raw_key),
            })
        })
        .collect()
}

/// Decode an object key as it appears in S3 event notifications.
///
/// S3 form-encodes keys in events: spaces become `+` and everything else is
/// percent-escaped. Invalid UTF-8 is replaced rather than rejected.
pub fn decode_s3_key(raw: &str) -> String {
    let plus_decoded = raw.replace('+', " ");
    percent_decode_str(&plus_decoded)
        .decode_utf8_lossy()
        .into_owned()
}

/// The message Textract publishes to SNS when an asynchronous job finishes.
#[derive(Clone, Debug, Deserialize, JsonSchema, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TextractNotification {
    /// The job this message is about.
    pub job_id: String,

    /// The final job status, normally `SUCCEEDED`, `FAILED` or `ERROR`.
    pub status: String,

    /// The API that started the job.
    #[serde(rename = "API", default, skip_serializing_if = "Option::is_none")]
    pub api: Option<String>,

    /// The job tag supplied when the job was started, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_tag: Option<String>,

    /// When the job finished, in milliseconds since the Unix epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,

    /// The document the job processed.
    pub document_location: DocumentLocation,
}

impl TextractNotification {
    /// Parse the notification carried by the first record of an SNS event.
    pub fn from_sns_event(event: &SnsEvent) -> Result<Self> {
        let record = event
            .records
            .first()
            .ok_or_else(|| anyhow!("SNS event contains no records"))?;
        serde_json::from_str(&record.sns.message)
            .context("failed to parse Textract notification from SNS message")
    }

    /// Did the job finish successfully?
    pub fn succeeded(&self) -> bool {
        self.status == JOB_SUCCEEDED
    }

    /// The document name: the object name minus one trailing `.pdf`.
    pub fn document_name(&self) -> &str {
        let name = &self.document_location.s3_object_name;
        name.strip_suffix(PDF_SUFFIX).unwrap_or(name)
    }
}

/// Where the processed document lives in S3.
#[derive(Clone, Debug, Deserialize, JsonSchema, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DocumentLocation {
    /// The object key.
    pub s3_object_name: String,

    /// The bucket name.
    #[serde(default)]
    pub s3_bucket: String,
}
