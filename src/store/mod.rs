//! Writing result files to object storage.

use std::fmt;

use crate::prelude::*;

pub mod s3;

/// The location of an object in a bucket.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectLocation {
    /// The bucket name.
    pub bucket: String,

    /// The object key.
    pub key: String,
}

impl fmt::Display for ObjectLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s3://{}/{}", self.bucket, self.key)
    }
}

/// Interface to an object store.
#[async_trait]
pub trait ObjectStore: Send + Sync + 'static {
    /// Store `body` at `location`, replacing anything already there.
    async fn put_object(
        &self,
        location: &ObjectLocation,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<()>;
}
