use crate::rpc::{Block, Transaction};

/// Free-text filter over transaction senders and receivers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self(query.into())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Case-sensitive substring match against either end of the transfer
    pub fn matches_transaction(&self, tx: &Transaction) -> bool {
        tx.sender.contains(&self.0) || tx.receiver.contains(&self.0)
    }

    /// An empty query matches every block, even one without transactions
    pub fn matches_block(&self, block: &Block) -> bool {
        self.is_empty() || block.transactions.iter().any(|tx| self.matches_transaction(tx))
    }

    /// Lazily filter a block sequence, preserving its order
    pub fn filter<'a>(&'a self, blocks: &'a [Block]) -> impl Iterator<Item = &'a Block> + Clone + 'a {
        blocks.iter().filter(move |block| self.matches_block(block))
    }

    /// Returns a human-readable description of the filter
    pub fn description(&self) -> String {
        if self.is_empty() {
            "All blocks".to_string()
        } else {
            format!("Sender/receiver contains \"{}\"", self.0)
        }
    }
}
