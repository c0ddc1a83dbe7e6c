mod helper;
mod types;

pub use helper::*;
pub use types::*;

use alloy::{
    network::Ethereum,
    providers::{Provider, ProviderBuilder, RootProvider},
};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Value};
use std::borrow::Cow;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

type HttpProvider = RootProvider<Ethereum>;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Failure of a single call against a block source
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FeedError {
    /// Network failure or non-success HTTP status
    #[error("transport error: {0}")]
    Transport(String),
    /// JSON-RPC error envelope
    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },
    /// Missing `result`, null result or an unexpected response shape
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Which wire protocol the block source speaks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    #[default]
    Rpc,
    Rest,
}

/// The remote collaborator the feed reads from and mints through
#[async_trait]
pub trait BlockSource: Send + Sync {
    async fn fetch_snapshot(&self) -> Result<Snapshot, FeedError>;
    async fn create_block(&self) -> Result<Block, FeedError>;
}

/// Build the block source for an endpoint
pub fn connect(url: &str, transport: Transport) -> Result<Arc<dyn BlockSource>> {
    Ok(match transport {
        Transport::Rpc => Arc::new(RpcClient::new(url)?),
        Transport::Rest => Arc::new(RestClient::new(url)?),
    })
}

/// JSON-RPC 2.0 client over HTTP POST
pub struct RpcClient {
    provider: HttpProvider,
}

impl RpcClient {
    pub fn new(rpc_url: &str) -> Result<Self> {
        let url = rpc_url.parse().context("Invalid RPC URL")?;
        let provider = ProviderBuilder::new()
            .disable_recommended_fillers()
            .network::<Ethereum>()
            .connect_http(url);

        Ok(Self { provider })
    }

    /// Issue one call and decode its `result`; the id and envelope are
    /// handled by the provider
    async fn call<R>(&self, method: &'static str, params: Value) -> Result<R, FeedError>
    where
        R: DeserializeOwned,
    {
        debug!(method, "rpc call");
        let call = self
            .provider
            .raw_request::<Value, Value>(Cow::Borrowed(method), params);

        let result = match tokio::time::timeout(REQUEST_TIMEOUT, call).await {
            Ok(result) => result.map_err(classify_transport_error)?,
            Err(_) => {
                return Err(FeedError::Transport(format!(
                    "{method} timed out after {}s",
                    REQUEST_TIMEOUT.as_secs()
                )))
            }
        };

        if result.is_null() {
            return Err(FeedError::Malformed(format!("{method} returned a null result")));
        }
        serde_json::from_value(result).map_err(|e| FeedError::Malformed(e.to_string()))
    }

    pub async fn get_latest_block(&self) -> Result<Snapshot, FeedError> {
        let payload: SnapshotPayload = self.call("get_latest_block", json!([])).await?;
        Ok(payload.into())
    }

    pub async fn upload_file(
        &self,
        filename: &str,
        bytes: &[u8],
    ) -> Result<UploadedFile, FeedError> {
        let params = UploadParams {
            filename: filename.to_string(),
            data: encode_base64(bytes),
        };
        let params = serde_json::to_value(params)
            .map_err(|e| FeedError::Malformed(format!("cannot encode upload: {e}")))?;
        self.call("upload_file", params).await
    }

    pub async fn get_file(&self, file_id: &str) -> Result<DownloadedFile, FeedError> {
        let payload: FilePayload = self.call("get_file", json!(file_id)).await?;
        Ok(DownloadedFile {
            bytes: decode_base64(&payload.data)?,
            filename: payload.filename,
            content_type: payload.content_type,
        })
    }
}

#[async_trait]
impl BlockSource for RpcClient {
    async fn fetch_snapshot(&self) -> Result<Snapshot, FeedError> {
        self.get_latest_block().await
    }

    async fn create_block(&self) -> Result<Block, FeedError> {
        let payload: CreatedPayload = self.call("create_block", json!([])).await?;
        Ok(payload.into())
    }
}

/// Plain REST variant of the block source
pub struct RestClient {
    base_url: reqwest::Url,
    http: reqwest::Client,
}

impl RestClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let mut base_url: reqwest::Url = base_url.parse().context("Invalid REST URL")?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { base_url, http })
    }

    fn endpoint(&self, path: &str) -> Result<reqwest::Url, FeedError> {
        self.base_url
            .join(path)
            .map_err(|e| FeedError::Transport(format!("invalid endpoint {path}: {e}")))
    }

    async fn read_json<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, FeedError> {
        let response = response.error_for_status().map_err(classify_reqwest_error)?;
        let body = response.text().await.map_err(classify_reqwest_error)?;
        serde_json::from_str(&body).map_err(|e| FeedError::Malformed(e.to_string()))
    }
}

#[async_trait]
impl BlockSource for RestClient {
    async fn fetch_snapshot(&self) -> Result<Snapshot, FeedError> {
        let url = self.endpoint("get_all_blocks")?;
        debug!(%url, "rest fetch");
        let response = self.http.get(url).send().await.map_err(classify_reqwest_error)?;
        let payload: SnapshotPayload = Self::read_json(response).await?;
        Ok(payload.into())
    }

    async fn create_block(&self) -> Result<Block, FeedError> {
        let url = self.endpoint("create_block")?;
        debug!(%url, "rest create");
        let response = self.http.post(url).send().await.map_err(classify_reqwest_error)?;
        let payload: CreatedPayload = Self::read_json(response).await?;
        Ok(payload.into())
    }
}
