//! Reading and writing local JSON files.
//!
//! Only used when running a handler by hand. Under Lambda, the runtime does
//! all of this for us.

use serde::de::DeserializeOwned;
use tokio::{
    fs::File,
    io::{AsyncWrite, AsyncWriteExt as _},
};

use crate::prelude::*;

/// Read a JSON value from a file.
#[instrument(level = "debug", skip_all, fields(path = %path.display()))]
pub async fn read_json<T>(path: &Path) -> Result<T>
where
    T: DeserializeOwned,
{
    let data = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read file at path: {:?}", path))?;
    serde_json::from_str(&data)
        .with_context(|| format!("Failed to parse JSON from file at path: {:?}", path))
}

/// Create an [`AsyncWrite`] for a file or stdout.
pub async fn create_writer(
    path: Option<&Path>,
) -> Result<Box<dyn AsyncWrite + Unpin + Send + Sync + 'static>> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .await
                .with_context(|| format!("Failed to create file at path: {:?}", path))?;
            Ok(Box::new(file))
        }
        None => Ok(Box::new(tokio::io::stdout())),
    }
}

/// Write a value as pretty-printed JSON to a file or stdout.
pub async fn write_json<T>(path: Option<&Path>, value: &T) -> Result<()>
where
    T: Serialize,
{
    let mut wtr = create_writer(path).await?;
    let mut json =
        serde_json::to_string_pretty(value).context("Failed to serialize JSON output")?;
    json.push('\n');
    wtr.write_all(json.as_bytes())
        .await
        .context("Failed to write JSON output")?;
    wtr.flush().await.context("Failed to flush JSON output")?;
    Ok(())
}
