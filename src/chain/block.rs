use crate::tx::Transaction;
use serde::{Deserialize, Serialize};

/// Sentinel `pre_block_hash` of the genesis block.
pub const GENESIS_PRE_BLOCK_HASH: &str = "0";

/// An ordered container of transactions plus chain-linkage metadata.
///
/// The timestamp is metadata only and never enters the hash; mining the
/// same inputs therefore reproduces the same nonce and hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub height: usize,
    pub timestamp: i64,
    pub pre_block_hash: String,
    pub hash: String,
    pub transactions: Vec<Transaction>,
    pub nonce: u64,
}

impl Block {
    /// Assemble a block from an already-found proof-of-work result.
    ///
    /// The hash is supplied by the caller and deliberately not recomputed
    /// here; recomputing it would overwrite whatever the stored hash no
    /// longer matches, which is exactly the signal verification relies on.
    pub fn new_block(
        nonce: u64,
        pre_block_hash: String,
        hash: String,
        transactions: Vec<Transaction>,
        height: usize,
    ) -> Block {
        Block {
            height,
            timestamp: crate::current_timestamp(),
            pre_block_hash,
            hash,
            transactions,
            nonce,
        }
    }

    /// Genesis block: fixed sentinel predecessor, no transactions, nonce 0,
    /// hash computed with the canonical formula so a fresh chain verifies.
    pub fn genesis() -> Block {
        let hash = block_hash(GENESIS_PRE_BLOCK_HASH, &[], 0);
        Block::new_block(0, GENESIS_PRE_BLOCK_HASH.to_string(), hash, Vec::new(), 0)
    }

    /// Recompute this block's hash from its current contents.
    pub fn recompute_hash(&self) -> String {
        block_hash(&self.pre_block_hash, &self.transactions, self.nonce)
    }
}

/// The canonical block hash formula, shared by mining and verification:
/// SHA256 over `pre_block_hash ‖ tx ids in order ‖ nonce (big-endian)`.
pub fn block_hash(pre_block_hash: &str, transactions: &[Transaction], nonce: u64) -> String {
    hex::encode(block_hash_digest(pre_block_hash, transactions, nonce))
}

/// Raw digest form of [`block_hash`], for the miner's target comparison.
pub fn block_hash_digest(
    pre_block_hash: &str,
    transactions: &[Transaction],
    nonce: u64,
) -> Vec<u8> {
    let mut data = Vec::new();
    data.extend_from_slice(pre_block_hash.as_bytes());
    for tx in transactions {
        data.extend_from_slice(tx.id.as_bytes());
    }
    data.extend_from_slice(&nonce.to_be_bytes());
    crate::sha256_digest(&data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tx::Amount;

    #[test]
    fn test_genesis_is_internally_consistent() {
        let genesis = Block::genesis();
        assert_eq!(genesis.height, 0);
        assert_eq!(genesis.nonce, 0);
        assert_eq!(genesis.pre_block_hash, GENESIS_PRE_BLOCK_HASH);
        assert!(genesis.transactions.is_empty());
        assert_eq!(genesis.hash, genesis.recompute_hash());
    }

    #[test]
    fn test_block_hash_is_order_sensitive() {
        let a = Transaction::new("Alice".into(), "Bob".into(), Amount::from_minor(100)).unwrap();
        let b = Transaction::new("Carol".into(), "Dave".into(), Amount::from_minor(250)).unwrap();
        let forward = block_hash("0", &[a.clone(), b.clone()], 7);
        let reversed = block_hash("0", &[b, a], 7);
        assert_ne!(forward, reversed);
    }

    #[test]
    fn test_constructor_does_not_touch_supplied_hash() {
        let block = Block::new_block(3, "0".to_string(), "bogus".to_string(), Vec::new(), 1);
        assert_eq!(block.hash, "bogus");
        assert_ne!(block.hash, block.recompute_hash());
    }
}
