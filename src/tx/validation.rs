use crate::error::{Error, Result};
use crate::tx::Amount;

/// Validate raw transaction inputs before hashing.
///
/// Hashing malformed data would produce a valid-looking but meaningless
/// ledger entry, so empty identifiers and negative values are rejected up
/// front instead of being silently absorbed into an id.
pub fn validate_transaction_inputs(sender: &str, recipient: &str, value: Amount) -> Result<()> {
    if sender.is_empty() {
        return Err(Error::InvalidTransaction("empty sender".to_string()));
    }
    if recipient.is_empty() {
        return Err(Error::InvalidTransaction("empty recipient".to_string()));
    }
    if value.is_negative() {
        return Err(Error::InvalidTransaction(format!(
            "negative value: {}",
            value
        )));
    }
    Ok(())
}
