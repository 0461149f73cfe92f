use std::{fmt, io, path::PathBuf};

/// Fatal lineup source errors. Any of these abort the run with a non-zero
/// exit; there is no per-artist recovery before a lineup exists.
#[derive(Debug)]
pub enum LineupError {
    IoError(io::Error),
    NotFound(PathBuf),
    ParseError(String),
    SerdeError(serde_json::Error),
}

impl From<io::Error> for LineupError {
    fn from(err: io::Error) -> Self {
        LineupError::IoError(err)
    }
}

impl From<serde_json::Error> for LineupError {
    fn from(err: serde_json::Error) -> Self {
        LineupError::SerdeError(err)
    }
}

impl fmt::Display for LineupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineupError::IoError(e) => write!(f, "lineup io error: {}", e),
            LineupError::NotFound(path) => {
                write!(f, "lineup file not found: {}", path.display())
            }
            LineupError::ParseError(msg) => write!(f, "invalid lineup: {}", msg),
            LineupError::SerdeError(e) => write!(f, "invalid lineup json: {}", e),
        }
    }
}

impl std::error::Error for LineupError {}

/// Errors from catalog API calls. Per-artist callers (resolution, top
/// tracks) record these as outcomes and continue; playlist mutation
/// callers abort the remaining batches of the current phase.
#[derive(Debug)]
pub enum CatalogError {
    HttpError(reqwest::Error),
    ApiError(String),
    RateLimited(u64),
    MalformedResponse(String),
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        CatalogError::HttpError(err)
    }
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::HttpError(e) => write!(f, "http error: {}", e),
            CatalogError::ApiError(msg) => write!(f, "api error: {}", msg),
            CatalogError::RateLimited(secs) => {
                write!(f, "rate limited, retry after {} seconds", secs)
            }
            CatalogError::MalformedResponse(msg) => {
                write!(f, "malformed response: {}", msg)
            }
        }
    }
}

impl std::error::Error for CatalogError {}
