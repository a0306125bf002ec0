use thiserror::Error;

/// Errors from the I/O side of the crate: fetching pages, reading the
/// catalog file, writing feeds. The normalization engine never returns these.
#[derive(Debug, Error)]
pub enum Error {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("selector error: {0}")]
    Selector(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("feed error: {0}")]
    Feed(#[from] rss::Error),

    #[error("feed is not valid utf-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("invalid catalog: {0}")]
    Catalog(String),
}

pub type Result<T> = std::result::Result<T, Error>;
