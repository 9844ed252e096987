use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

// Every failure the engine can surface. Nothing is retried or swallowed
// internally; the run loop terminates on the first unrecovered error.
#[derive(Error, Debug)]
pub enum Error {
    #[error("unsupported output kind `{0}`")]
    UnsupportedOutputKind(String),

    #[error("spendable output at index {0} carries no address")]
    MissingAddress(u32),

    #[error("unexpected chain reorganization at height {0}")]
    UnexpectedReorg(u64),

    #[error("node transport failed: {0}")]
    Transport(#[from] jsonrpc::Error),

    #[error("unexpected node response: {0}")]
    BadResponse(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("block handler failed: {0}")]
    Callback(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    // Wraps a failure raised by a consumer callback.
    pub fn callback<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Error::Callback(err.into())
    }
}
