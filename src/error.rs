use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Invalid window length or alphabet.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The sequence is shorter than the window.
    #[error("sequence of length {len} is shorter than the window length {sslen}")]
    ShortSequence { len: usize, sslen: usize },

    /// The sequence contains a symbol that is not in the alphabet.
    #[error("symbol {symbol:?} at position {pos} is not in the alphabet")]
    ForeignSymbol { symbol: char, pos: usize },

    /// A cached slice does not match the alphabet or length it was requested for.
    #[error("cache inconsistency: {0}")]
    CacheInconsistency(String),

    /// Propagated I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// True for errors caused by the scanned sequence rather than the setup.
    pub fn is_domain(&self) -> bool {
        matches!(self, Error::ShortSequence { .. } | Error::ForeignSymbol { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
