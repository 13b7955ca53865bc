//! Object storage using AWS S3.

use aws_sdk_s3::primitives::ByteStream;

use crate::{aws::sdk_error, prelude::*};

use super::{ObjectLocation, ObjectStore};

/// Object store wrapping the AWS S3 API.
#[derive(Clone, Debug)]
pub struct S3ObjectStore {
    /// AWS S3 client.
    client: aws_sdk_s3::Client,
}

impl S3ObjectStore {
    /// Create a new store from a shared AWS configuration.
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: aws_sdk_s3::Client::new(config),
        }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    #[instrument(
        level = "debug",
        skip(self, location, body),
        fields(location = %location, len = body.len())
    )]
    async fn put_object(
        &self,
        location: &ObjectLocation,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<()> {
        let output = self
            .client
            .put_object()
            .bucket(&location.bucket)
            .key(&location.key)
            .content_type(content_type)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(sdk_error)
            .with_context(|| format!("failed to write {location}"))?;
        debug!(e_tag = output.e_tag().unwrap_or_default(), "Wrote object");
        Ok(())
    }
}
