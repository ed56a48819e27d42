//! Reading attachments from local paths.

use anyhow::Context;
use bytes::Bytes;
use lexflow_services::Attachment;
use std::path::Path;

/// Read `path` into an attachment named after its final component.
/// The content type is guessed from the extension.
pub async fn load_attachment(path: &Path) -> anyhow::Result<Attachment> {
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
        .with_context(|| format!("Not a file path: {}", path.display()))?
        .to_string();

    let data = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let content_type = mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string();

    Ok(Attachment::new(filename, content_type, Bytes::from(data)))
}

/// Split a comma-separated list of paths, ignoring blanks.
pub fn parse_path_list(input: &str) -> Vec<&str> {
    input
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}
