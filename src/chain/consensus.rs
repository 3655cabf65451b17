use crate::chain::block::block_hash_digest;
use crate::logger::Logger;
use crate::tx::Transaction;
use hex::encode as hex_encode;
use num_bigint::{BigInt, Sign};

/// Proof-of-work search over the nonce space of a candidate block.
///
/// A difficulty of `d` leading '0' hex characters is expressed as the
/// target `2^(256 - 4d)`: a hash meets the difficulty exactly when its
/// big-endian integer value is strictly below the target. Difficulty 0
/// gives a target above every possible hash, so nonce 0 matches at once.
pub struct ProofOfWork {
    pub pre_block_hash: String,
    pub transactions: Vec<Transaction>,
    pub target: BigInt,
}

impl ProofOfWork {
    pub fn new(pre_block_hash: String, transactions: Vec<Transaction>, difficulty: u32) -> Self {
        ProofOfWork {
            pre_block_hash,
            transactions,
            target: target_for_difficulty(difficulty),
        }
    }

    /// Exhaustive ordered search: nonce 0, 1, 2, ... until the canonical
    /// block hash falls below the target. Unbounded and blocking; for a
    /// high difficulty this runs arbitrarily long, which is proof-of-work's
    /// defining cost. Deterministic for identical inputs.
    pub fn run(&self) -> (u64, String) {
        Logger::info("Mining the block");
        let mut nonce: u64 = 0;
        loop {
            let digest = block_hash_digest(&self.pre_block_hash, &self.transactions, nonce);
            let hash_int = BigInt::from_bytes_be(Sign::Plus, &digest);
            if hash_int < self.target {
                let hash = hex_encode(&digest);
                Logger::info(&hash);
                return (nonce, hash);
            }
            nonce += 1;
        }
    }
}

/// Target for `difficulty` leading zero hex characters. A difficulty past
/// 64 saturates to the all-zero hash requirement instead of underflowing.
pub fn target_for_difficulty(difficulty: u32) -> BigInt {
    BigInt::from(1) << 256usize.saturating_sub(4 * difficulty.min(64) as usize)
}

/// Prefix form of the difficulty check, for inspection and tests.
pub fn meets_difficulty(hash: &str, difficulty: u32) -> bool {
    hash.len() >= difficulty as usize
        && hash[..difficulty as usize].bytes().all(|b| b == b'0')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::block::block_hash;
    use crate::tx::Amount;

    #[test]
    fn test_zero_difficulty_matches_at_nonce_zero() {
        let pow = ProofOfWork::new("0".to_string(), Vec::new(), 0);
        let (nonce, hash) = pow.run();
        assert_eq!(nonce, 0);
        assert_eq!(hash, block_hash("0", &[], 0));
    }

    #[test]
    fn test_found_hash_meets_difficulty_and_formula() {
        let tx = Transaction::new("Alice".into(), "Bob".into(), Amount::from_minor(100)).unwrap();
        let pow = ProofOfWork::new("0".to_string(), vec![tx.clone()], 2);
        let (nonce, hash) = pow.run();
        assert!(meets_difficulty(&hash, 2));
        assert_eq!(hash, block_hash("0", &[tx], nonce));
    }

    #[test]
    fn test_search_is_deterministic() {
        let pow_a = ProofOfWork::new("abc".to_string(), Vec::new(), 2);
        let pow_b = ProofOfWork::new("abc".to_string(), Vec::new(), 2);
        assert_eq!(pow_a.run(), pow_b.run());
    }

    #[test]
    fn test_target_matches_prefix_check() {
        // The BigInt comparison and the hex-prefix check must agree.
        for difficulty in 0..4u32 {
            let target = target_for_difficulty(difficulty);
            for seed in 0u64..64 {
                let hash = crate::sha256_hex(&seed.to_be_bytes());
                let hash_int = BigInt::from_bytes_be(Sign::Plus, &hex::decode(&hash).unwrap());
                assert_eq!(
                    hash_int < target,
                    meets_difficulty(&hash, difficulty),
                    "difficulty {} hash {}",
                    difficulty,
                    hash
                );
            }
        }
    }
}
