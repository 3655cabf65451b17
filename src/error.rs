use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Index out of range: {kind} index {index} (len {len})")]
    IndexOutOfRange {
        kind: &'static str,
        index: usize,
        len: usize,
    },

    #[error("Invalid transaction: {0}")]
    InvalidTransaction(String),
}

pub type Result<T> = std::result::Result<T, Error>;
