pub mod amount;
pub mod transaction;
pub mod validation;

pub use amount::Amount;
pub use transaction::Transaction;
pub use validation::validate_transaction_inputs;
