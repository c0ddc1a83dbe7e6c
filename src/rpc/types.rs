use serde::{Deserialize, Serialize};

/// A transfer between two addresses carried inside a block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub sender: String,
    pub receiver: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default, alias = "gasCost")]
    pub gas_cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub hash: String,
    pub index: u64,
    /// Epoch milliseconds
    pub timestamp: u64,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub tokens: u64,
    #[serde(default, alias = "minerAddress")]
    pub miner_address: String,
    #[serde(default, alias = "prevHash", skip_serializing_if = "Option::is_none")]
    pub prev_hash: Option<String>,
    #[serde(default, alias = "tokenName", skip_serializing_if = "Option::is_none")]
    pub token_name: Option<String>,
}

/// One normalized fetch of the block feed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub blocks: Vec<Block>,
    /// Totals as reported by the source, when it reports them
    pub reported_total_blocks: Option<u64>,
    pub reported_total_tokens: Option<u64>,
}

impl Snapshot {
    pub fn total_tokens(&self) -> u64 {
        self.blocks.iter().map(|b| b.tokens).sum()
    }
}

/// Every response shape a block source has been seen to return for "all
/// blocks": the JSON-RPC envelope result, or a bare array from REST.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum SnapshotPayload {
    Envelope {
        blocks: Vec<Block>,
        #[serde(default, rename = "totalBlocks", alias = "total_blocks")]
        total_blocks: Option<u64>,
        #[serde(default, rename = "totalTokens", alias = "total_tokens")]
        total_tokens: Option<u64>,
    },
    List(Vec<Block>),
}

impl From<SnapshotPayload> for Snapshot {
    fn from(payload: SnapshotPayload) -> Self {
        match payload {
            SnapshotPayload::Envelope {
                blocks,
                total_blocks,
                total_tokens,
            } => Snapshot {
                blocks,
                reported_total_blocks: total_blocks,
                reported_total_tokens: total_tokens,
            },
            SnapshotPayload::List(blocks) => Snapshot {
                blocks,
                reported_total_blocks: None,
                reported_total_tokens: None,
            },
        }
    }
}

/// Response of a block-minting call: `{block}`, `{message, block}` or the
/// bare block record
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum CreatedPayload {
    Wrapped {
        block: Block,
        #[serde(default)]
        message: Option<String>,
    },
    Bare(Block),
}

impl From<CreatedPayload> for Block {
    fn from(payload: CreatedPayload) -> Self {
        match payload {
            CreatedPayload::Wrapped { block, .. } => block,
            CreatedPayload::Bare(block) => block,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UploadParams {
    pub filename: String,
    /// Standard base64 of the file contents
    pub data: String,
}

/// Metadata returned after a successful upload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub id: String,
    pub filename: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default, alias = "contentType")]
    pub content_type: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FilePayload {
    pub filename: String,
    #[serde(default, alias = "contentType")]
    pub content_type: String,
    pub data: String,
}

/// A downloaded file, already decoded
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadedFile {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}
