use crate::error::Result;
use crate::tx::{validate_transaction_inputs, Amount};
use serde::{Deserialize, Serialize};

/// An immutable record of value transfer, self-identified by a content hash.
///
/// The id commits to sender, recipient, and the canonical decimal rendering
/// of the value. `sender`/`recipient` stay public so the ledger's tamper
/// hook can mutate a mined transaction in place; the stored id then no
/// longer matches the content and verification catches it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub sender: String,
    pub recipient: String,
    pub value: Amount,
}

impl Transaction {
    /// Create a transaction with its id derived from the content.
    ///
    /// Rejects empty sender/recipient and negative values.
    pub fn new(sender: String, recipient: String, value: Amount) -> Result<Transaction> {
        validate_transaction_inputs(&sender, &recipient, value)?;
        let id = Self::derive_id(&sender, &recipient, value);
        Ok(Transaction {
            id,
            sender,
            recipient,
            value,
        })
    }

    /// Re-derive the id from the current field contents.
    ///
    /// Used by chain verification; a mismatch against the stored id means
    /// the transaction was mutated after mining.
    pub fn recompute_id(&self) -> String {
        Self::derive_id(&self.sender, &self.recipient, self.value)
    }

    fn derive_id(sender: &str, recipient: &str, value: Amount) -> String {
        let mut data = Vec::new();
        data.extend_from_slice(sender.as_bytes());
        data.extend_from_slice(recipient.as_bytes());
        data.extend_from_slice(value.to_string().as_bytes());
        crate::sha256_hex(&data)
    }
}
