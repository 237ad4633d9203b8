use thiserror::Error;

pub type Result<T> = std::result::Result<T, LedgerError>;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("payer must not be empty")]
    EmptyPayer,
    #[error("points must be non-zero")]
    ZeroPoints,
    #[error("timestamp {value:?} is not valid RFC3339: {source}")]
    InvalidTimestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
    #[error("spend amount must be non-negative, got {amount}")]
    NegativeSpend { amount: i64 },
    #[error("insufficient points: requested {requested}, available {available}")]
    InsufficientPoints { requested: i64, available: i64 },
}
