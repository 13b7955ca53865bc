//! Collect the text of a finished Textract job and store it as Parquet.

use std::collections::{BTreeMap, HashSet};

use aws_lambda_events::event::sns::SnsEvent;
use schemars::JsonSchema;

use crate::{
    columnar::{PARQUET_CONTENT_TYPE, PARQUET_EXTENSION, page_records_to_parquet},
    config::GetTextConfig,
    events::TextractNotification,
    ocr::TextDetector,
    pages::{PageRecord, PageTable},
    prelude::*,
    store::{ObjectLocation, ObjectStore},
};

/// What the `get-text` handler returns.
#[derive(Clone, Debug, JsonSchema, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum GetTextOutput {
    /// The job did not succeed, so nothing was fetched or written.
    Skipped {
        /// The status Textract reported.
        status: String,
    },

    /// The page records were written.
    Written(WriteOutcome),
}

/// Where we wrote our results.
#[derive(Clone, Debug, JsonSchema, PartialEq, Eq, Serialize)]
pub struct WriteOutcome {
    /// The `s3://` URLs of the files we wrote.
    pub paths: Vec<String>,

    /// Partition values for each written path. We never partition, so this
    /// is always empty.
    pub partitions_values: BTreeMap<String, Vec<String>>,
}

/// Handle a Textract job-completion notification.
///
/// Errors fetching results or writing the output are returned as-is, so the
/// platform records a failed invocation.
#[instrument(level = "debug", skip_all)]
pub async fn get_text(
    ocr: &dyn TextDetector,
    store: &dyn ObjectStore,
    config: &GetTextConfig,
    event: &SnsEvent,
) -> Result<GetTextOutput> {
    let notification = TextractNotification::from_sns_event(event)?;
    let job_id = notification.job_id.as_str();
    info!(%job_id, status = %notification.status, "Received Textract notification");

    if !notification.succeeded() {
        // TODO: Send failed jobs to a dead-letter queue instead of dropping
        // them here.
        warn!(%job_id, status = %notification.status, "Skipping unsuccessful job");
        return Ok(GetTextOutput::Skipped {
            status: notification.status,
        });
    }

    debug!(
        glue_catalog_db_name = ?config.glue_catalog_db_name,
        glue_catalog_table_name = ?config.glue_catalog_table_name,
        "Catalog settings are not used when writing results"
    );

    let document_name = notification.document_name();
    let records = extract_pages(ocr, job_id, &format!("{document_name}.pdf")).await?;

    let location = ObjectLocation {
        bucket: config.output_bucket.clone(),
        key: format!("{document_name}_{job_id}.{PARQUET_EXTENSION}"),
    };
    let body = page_records_to_parquet(&records)?;
    store
        .put_object(&location, body, PARQUET_CONTENT_TYPE)
        .await?;
    info!(%job_id, %location, pages = records.len(), "Wrote page records");

    Ok(GetTextOutput::Written(WriteOutcome {
        paths: vec![location.to_string()],
        partitions_values: BTreeMap::new(),
    }))
}

/// Fetch every result page for `job_id` and collect one record per document
/// page, in first-seen page order.
///
/// Fetches run one at a time, each using the continuation token from the
/// previous response. A token we have already used is an error, so this
/// always terminates.
#[instrument(level = "debug", skip(ocr))]
pub async fn extract_pages(
    ocr: &dyn TextDetector,
    job_id: &str,
    document: &str,
) -> Result<Vec<PageRecord>> {
    let mut table = PageTable::new(document);
    let mut used_tokens = HashSet::new();
    let mut next_token: Option<String> = None;
    let mut fetch_count = 0usize;

    loop {
        let response = ocr
            .get_text_detection_result(job_id, next_token.as_deref())
            .await?;
        fetch_count += 1;
        for warning in &response.warnings {
            warn!(%job_id, %warning, "Textract reported a warning");
        }
        table.add_blocks(&response.blocks);

        match response.next_token {
            Some(token) if !token.is_empty() => {
                if !used_tokens.insert(token.clone()) {
                    return Err(anyhow!(
                        "Textract repeated continuation token {token:?} for job {job_id}"
                    ));
                }
                next_token = Some(token);
            }
            _ => break,
        }
    }

    if table.is_empty() {
        warn!(%job_id, "Textract found no lines of text");
    }
    debug!(fetch_count, pages = table.len(), "Collected Textract results");
    Ok(table.into_records())
}
