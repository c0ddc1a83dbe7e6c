use alloy::transports::{RpcError, TransportError};
use base64::{engine::general_purpose, Engine as _};
use std::path::Path;

use super::FeedError;

// ============================================================================
// Helper Functions
// ============================================================================

/// Map an alloy transport error onto the three failure kinds a block source
/// can produce
pub fn classify_transport_error(err: TransportError) -> FeedError {
    match err {
        RpcError::ErrorResp(payload) => FeedError::Rpc {
            code: payload.code,
            message: payload.message.to_string(),
        },
        RpcError::NullResp => FeedError::Malformed("response carried no result".to_string()),
        RpcError::DeserError { err, .. } => FeedError::Malformed(err.to_string()),
        other => FeedError::Transport(other.to_string()),
    }
}

pub fn classify_reqwest_error(err: reqwest::Error) -> FeedError {
    if err.is_decode() {
        FeedError::Malformed(err.to_string())
    } else if let Some(status) = err.status() {
        FeedError::Transport(format!("HTTP {status}"))
    } else {
        FeedError::Transport(err.to_string())
    }
}

pub fn encode_base64(bytes: &[u8]) -> String {
    general_purpose::STANDARD.encode(bytes)
}

/// Decode base64 file data, tolerating a `data:<mime>;base64,` prefix
pub fn decode_base64(data: &str) -> Result<Vec<u8>, FeedError> {
    let payload = match data.split_once(";base64,") {
        Some((prefix, rest)) if prefix.starts_with("data:") => rest,
        _ => data,
    };

    general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|e| FeedError::Malformed(format!("file data is not valid base64: {e}")))
}

/// Final path component of a server-supplied filename, so a download can
/// never escape its target directory
pub fn safe_filename(name: &str) -> Option<String> {
    let last = name.rsplit(['/', '\\']).next()?.trim();
    if last.is_empty() || last == "." || last == ".." {
        return None;
    }
    Path::new(last)
        .file_name()
        .and_then(|n| n.to_str())
        .map(String::from)
}
