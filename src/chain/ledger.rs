use crate::chain::block::Block;
use crate::chain::consensus::ProofOfWork;
use crate::config::DEFAULT_DIFFICULTY;
use crate::error::{Error, Result};
use crate::tx::{Amount, Transaction};
use serde::Serialize;
use std::fmt;

/// Outcome of a full-chain verification walk.
///
/// An invalid chain is a well-defined negative result, not an error: the
/// report names the first block (and transaction, where applicable) that
/// failed so a caller can show what was tampered with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum VerifyReport {
    Valid,
    Invalid(Fault),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Fault {
    /// Stored block hash does not match the canonical formula over the
    /// block's current contents.
    BlockHashMismatch { height: usize },
    /// `pre_block_hash` does not match the predecessor's stored hash.
    BrokenLink { height: usize },
    /// A contained transaction's stored id does not match its contents.
    TransactionIdMismatch { height: usize, tx_index: usize },
}

impl VerifyReport {
    pub fn is_valid(&self) -> bool {
        matches!(self, VerifyReport::Valid)
    }
}

impl fmt::Display for VerifyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerifyReport::Valid => write!(f, "chain valid"),
            VerifyReport::Invalid(Fault::BlockHashMismatch { height }) => {
                write!(f, "chain invalid: block {} hash mismatch", height)
            }
            VerifyReport::Invalid(Fault::BrokenLink { height }) => {
                write!(f, "chain invalid: block {} previous-hash link broken", height)
            }
            VerifyReport::Invalid(Fault::TransactionIdMismatch { height, tx_index }) => {
                write!(
                    f,
                    "chain invalid: block {} transaction {} id mismatch",
                    height, tx_index
                )
            }
        }
    }
}

/// Read-only projection of a transaction for callers to render.
#[derive(Debug, Clone, Serialize)]
pub struct TransactionView {
    pub id: String,
    pub sender: String,
    pub recipient: String,
    pub value: String,
}

/// Read-only projection of a block for callers to render.
#[derive(Debug, Clone, Serialize)]
pub struct BlockView {
    pub height: usize,
    pub timestamp: i64,
    pub nonce: u64,
    pub pre_block_hash: String,
    pub hash: String,
    pub transactions: Vec<TransactionView>,
}

impl From<&Block> for BlockView {
    fn from(block: &Block) -> Self {
        BlockView {
            height: block.height,
            timestamp: block.timestamp,
            nonce: block.nonce,
            pre_block_hash: block.pre_block_hash.clone(),
            hash: block.hash.clone(),
            transactions: block
                .transactions
                .iter()
                .map(|tx| TransactionView {
                    id: tx.id.clone(),
                    sender: tx.sender.clone(),
                    recipient: tx.recipient.clone(),
                    value: tx.value.to_string(),
                })
                .collect(),
        }
    }
}

/// The append-only ledger: an owned chain of blocks plus the pool of
/// pending transactions, mined into blocks at a fixed difficulty.
///
/// Single-writer by construction. A multi-threaded caller must wrap the
/// whole ledger in one lock: mining snapshots the pool and then clears it,
/// and that sequence must be atomic with respect to submissions.
#[derive(Debug, Clone)]
pub struct Ledger {
    chain: Vec<Block>,
    pool: Vec<Transaction>,
    difficulty: u32,
}

impl Ledger {
    /// Initialize a ledger with the genesis block and an empty pool.
    pub fn new(difficulty: u32) -> Ledger {
        Ledger {
            chain: vec![Block::genesis()],
            pool: Vec::new(),
            difficulty,
        }
    }

    /// Number of blocks in the chain (genesis included).
    pub fn height(&self) -> usize {
        self.chain.len()
    }

    /// Number of pending transactions awaiting the next mined block.
    pub fn pool_len(&self) -> usize {
        self.pool.len()
    }

    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }

    /// Create a transaction and append it to the pool in arrival order.
    /// Strictly FIFO; no deduplication, no reordering.
    pub fn submit_transaction(
        &mut self,
        sender: String,
        recipient: String,
        value: Amount,
    ) -> Result<&Transaction> {
        let tx = Transaction::new(sender, recipient, value)?;
        self.pool.push(tx);
        Ok(self.pool.last().expect("pool is non-empty after push"))
    }

    /// Mine the pending pool into a new block and append it to the chain.
    ///
    /// The proof-of-work result (nonce, hash) is attached as returned by
    /// the search; the hash is never recomputed here, so a later tamper
    /// leaves the stored hash stale for verification to catch. The pool is
    /// cleared only after the block is on the chain. An empty pool is
    /// legal and produces a block with zero transactions.
    pub fn mine_block(&mut self) -> &Block {
        let previous = self.chain.last().expect("chain always holds genesis");
        let pow = ProofOfWork::new(previous.hash.clone(), self.pool.clone(), self.difficulty);
        let (nonce, hash) = pow.run();

        let block = Block::new_block(
            nonce,
            previous.hash.clone(),
            hash,
            self.pool.clone(),
            previous.height + 1,
        );
        self.chain.push(block);
        self.pool.clear();

        self.chain.last().expect("block was just appended")
    }

    /// Walk the whole chain, re-deriving every hash and re-checking every
    /// link. Returns on the first fault. Read-only and idempotent.
    ///
    /// Genesis carries a computed hash, so it goes through the same
    /// self-hash check as every other block.
    pub fn verify_chain(&self) -> VerifyReport {
        for (i, block) in self.chain.iter().enumerate() {
            for (tx_index, tx) in block.transactions.iter().enumerate() {
                if tx.recompute_id() != tx.id {
                    return VerifyReport::Invalid(Fault::TransactionIdMismatch {
                        height: i,
                        tx_index,
                    });
                }
            }
            if block.recompute_hash() != block.hash {
                return VerifyReport::Invalid(Fault::BlockHashMismatch { height: i });
            }
            if i > 0 && block.pre_block_hash != self.chain[i - 1].hash {
                return VerifyReport::Invalid(Fault::BrokenLink { height: i });
            }
        }
        VerifyReport::Valid
    }

    /// Read-only view of one block.
    pub fn block(&self, height: usize) -> Result<BlockView> {
        self.chain
            .get(height)
            .map(BlockView::from)
            .ok_or(Error::IndexOutOfRange {
                kind: "block",
                index: height,
                len: self.chain.len(),
            })
    }

    /// Read-only views of every block, in chain order.
    pub fn list_blocks(&self) -> Vec<BlockView> {
        self.chain.iter().map(BlockView::from).collect()
    }

    /// Deliberately corrupt a mined transaction's recipient.
    ///
    /// A test hook for demonstrating detection: no hash is recomputed
    /// afterwards, so the stored ids and hashes go stale and
    /// [`Ledger::verify_chain`] reports the mismatch.
    pub fn tamper(&mut self, height: usize, tx_index: usize, new_recipient: &str) -> Result<()> {
        let chain_len = self.chain.len();
        let block = self
            .chain
            .get_mut(height)
            .ok_or(Error::IndexOutOfRange {
                kind: "block",
                index: height,
                len: chain_len,
            })?;
        let tx_len = block.transactions.len();
        let tx = block
            .transactions
            .get_mut(tx_index)
            .ok_or(Error::IndexOutOfRange {
                kind: "transaction",
                index: tx_index,
                len: tx_len,
            })?;
        tx.recipient = new_recipient.to_string();
        Ok(())
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Ledger::new(DEFAULT_DIFFICULTY)
    }
}
