//! AWS-related code shared by different modules.

use aws_config::BehaviorVersion;
use aws_smithy_types::error::display::DisplayErrorContext;

use crate::prelude::*;

/// Load the user's AWS configuration using standard conventions.
pub async fn load_aws_config() -> Result<aws_config::SdkConfig> {
    Ok(aws_config::load_defaults(BehaviorVersion::latest()).await)
}

/// Convert an AWS SDK error into an [`anyhow::Error`], keeping the whole
/// chain of causes. The SDK's own `Display` only prints "service error".
pub fn sdk_error<E>(err: E) -> anyhow::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    anyhow!("{}", DisplayErrorContext(&err))
}
