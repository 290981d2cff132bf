use std::path::PathBuf;

use thiserror::Error;

use crate::symbol::Symbol;

#[derive(Debug, Error)]
pub enum Error {
    /// The frequency map cannot be turned into a tree: it is empty, or its
    /// counts add up past `u64::MAX`.
    #[error("invalid frequency map: {0}")]
    InvalidInput(&'static str),

    #[error("no code for symbol {0}")]
    UnknownSymbol(Symbol),

    /// The bit source ran dry before the end-of-payload marker was decoded.
    #[error("bit stream ended before the end-of-payload marker")]
    TruncatedStream,

    #[error("invalid tree: {0}")]
    InvalidTree(&'static str),

    #[error("malformed header: {0}")]
    MalformedHeader(String),

    #[error("key {0} is not in the map")]
    KeyNotFound(Symbol),

    #[error("not a compressed file name: {0:?}")]
    InvalidFileName(PathBuf),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
