use thiserror::Error;

#[derive(Error, Debug)]
pub enum HwpError {
    #[error("not a HWP 5.x document: {0}")]
    NotHwp5(String),

    #[error("document is encrypted")]
    Encrypted,

    #[error("truncated stream: {0}")]
    Truncated(String),

    #[error("decompression exceeded expansion limit: {0}")]
    DecodeLimit(String),

    #[error("malformed record: {0}")]
    MalformedRecord(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("container error: {0}")]
    Cfb(String),

    #[error("stream not found: {0}")]
    NotFound(String),

    #[error("encoding error: {0}")]
    Encoding(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, HwpError>;
