use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Missing line item: {0}")]
    MissingLineItem(String),

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Peer unavailable: {0}")]
    PeerUnavailable(String),
}
