use crate::rpc::{safe_filename, RpcClient, UploadedFile};
use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

/// Read a local file and upload it through `upload_file`
pub async fn upload(client: &RpcClient, path: &Path) -> Result<UploadedFile> {
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow!("{path:?} has no usable file name"))?;

    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {path:?}"))?;

    let uploaded = client
        .upload_file(filename, &bytes)
        .await
        .with_context(|| format!("Upload of {filename} failed"))?;

    info!(id = %uploaded.id, filename, size = bytes.len(), "file uploaded");
    Ok(uploaded)
}

/// Fetch a file by id and write it into `dir`, returning the written path
pub async fn download(client: &RpcClient, file_id: &str, dir: &Path) -> Result<PathBuf> {
    let file_id = file_id.trim();
    if file_id.is_empty() {
        return Err(anyhow!("Please enter a file ID"));
    }

    let file = client
        .get_file(file_id)
        .await
        .with_context(|| format!("Download of {file_id} failed"))?;

    let name = safe_filename(&file.filename)
        .or_else(|| safe_filename(file_id))
        .unwrap_or_else(|| "download".to_string());
    let target = dir.join(name);

    tokio::fs::write(&target, &file.bytes)
        .await
        .with_context(|| format!("Failed to write {target:?}"))?;

    info!(file_id, path = ?target, content_type = %file.content_type, "file downloaded");
    Ok(target)
}
