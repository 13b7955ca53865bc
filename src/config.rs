//! Handler configuration.
//!
//! Every setting can be passed as a flag, but in Lambda they normally come
//! from the function's environment variables.

use clap::Args;

use crate::ocr::NotificationChannel;

/// Settings for the `start-text` handler.
#[derive(Debug, Clone, Args)]
pub struct StartTextConfig {
    /// SNS topic Textract should publish job completion to.
    #[clap(long, env = "NOTIFICATION_TOPIC_ARN")]
    pub notification_topic_arn: String,

    /// IAM role Textract assumes to publish to the topic.
    #[clap(long, env = "NOTIFICATION_ROLE_ARN")]
    pub notification_role_arn: String,
}

impl StartTextConfig {
    /// The notification channel to pass with each job.
    pub fn notification_channel(&self) -> NotificationChannel {
        NotificationChannel {
            topic_arn: self.notification_topic_arn.clone(),
            role_arn: self.notification_role_arn.clone(),
        }
    }
}

/// Settings for the `get-text` handler.
#[derive(Debug, Clone, Args)]
pub struct GetTextConfig {
    /// Bucket to write Parquet results to.
    #[clap(long, env = "OUTPUT_BUCKET")]
    pub output_bucket: String,

    /// Glue catalog database for the results. Accepted but not used yet.
    #[clap(long, env = "GLUE_CATALOG_DB_NAME")]
    pub glue_catalog_db_name: Option<String>,

    /// Glue catalog table for the results. Accepted but not used yet.
    #[clap(long, env = "GLUE_CATALOG_TABLE_NAME")]
    pub glue_catalog_table_name: Option<String>,
}
