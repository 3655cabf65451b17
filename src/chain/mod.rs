pub mod block;
pub mod consensus;
pub mod ledger;

pub use block::Block;
pub use consensus::ProofOfWork;
pub use ledger::{BlockView, Fault, Ledger, TransactionView, VerifyReport};
